use water::{
    Error, run,
    error::{ArgCount, BindError, FatalError, LexError, ParseError},
    interpreter::{evaluator::core::MAX_CALL_DEPTH, parser::MAX_NESTING_DEPTH, value::Kind},
};

fn output_of(src: &str) -> String {
    let mut output = Vec::new();
    if let Err(e) = run(src, &mut output) {
        panic!("Script failed: {e}");
    }
    String::from_utf8(output).expect("output is UTF-8")
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(output_of(src), expected, "script: {src}");
}

fn assert_failure(src: &str) -> Error {
    let mut output = Vec::new();
    match run(src, &mut output) {
        Ok(()) => panic!("Script succeeded but was expected to fail: {src}"),
        Err(e) => e,
    }
}

/// Runs a failing script and returns the error with whatever was printed
/// before it.
fn failure_with_output(src: &str) -> (Error, String) {
    let mut output = Vec::new();
    let err = run(src, &mut output).expect_err("script should fail");
    (err, String::from_utf8(output).expect("output is UTF-8"))
}

#[test]
fn define_and_conditional_arithmetic() {
    assert_output("(define x 10)(if #t (+ x 5) 0)", "15\n");
    assert_output("(define x 10) (if #f (+ x 5) (- x 5))", "5\n");
}

#[test]
fn strings_print_verbatim() {
    assert_output("\"hello\"", "hello");
    assert_output("'single'", "single");
    assert_output(r#""a\tb\n""#, "a\tb\n");
    assert_output(r#""say \"hi\"""#, "say \"hi\"");
}

#[test]
fn non_string_results_end_with_newline() {
    assert_output("42", "42\n");
    assert_output("#t #f", "true\nfalse\n");
    assert_output("0x1F -0x10 +5 -7", "31\n-16\n5\n-7\n");
}

#[test]
fn unit_results_print_nothing() {
    assert_output("(define x 1)", "");
    assert_output("(define x 1) (set x 2)", "");
}

#[test]
fn arithmetic_builtins() {
    assert_output("(+ 1 2 3 4)", "10\n");
    assert_output("(- 5)", "-5\n");
    assert_output("(- 10 3 2)", "5\n");
    assert_output("(* 2 3 4)", "24\n");
    assert_output("(/ 7 2)", "3\n");
    assert_output("(% 7 2)", "1\n");
    assert_output("(+ -3 3)", "0\n");
}

#[test]
fn comparison_and_logic_builtins() {
    assert_output("(> 2 1) (>= 1 1) (< 2 1) (<= 3 2)", "true\ntrue\nfalse\nfalse\n");
    assert_output("(= 1 1) (= \"a\" \"b\") (= #t #t)", "true\nfalse\ntrue\n");
    assert_output("(not #f)", "true\n");
}

#[test]
fn formatted_output() {
    assert_output("(println \"x=%d, ok=%t\" 5 #t)", "x=5, ok=true\n");
    assert_output("(print \"a\") (print \"b\")", "ab");
    assert_output("(print \"100%%\")", "100%");
    assert_output("(concat \"a\" \"b\" \"c\")", "abc");
    assert_output("(repeat \"ab\" 3)", "ababab");
}

#[test]
fn nested_calls() {
    assert_output("(+ (* 2 3) (- 10 4))", "12\n");
    assert_output("(define sq (lambda (x) (* x x))) (sq (sq 3))", "81\n");
}

#[test]
fn begin_yields_last_value() {
    assert_output("(begin 1 2 3)", "3\n");
    assert_output("(begin (define a 4) (+ a 1))", "5\n");
}

#[test]
fn if_evaluates_only_the_taken_branch() {
    assert_output("(if #t 1 (undefined-call))", "1\n");
    assert_output("(if #f (undefined-call) 2)", "2\n");
}

#[test]
fn if_requires_boolean_test() {
    let err = assert_failure("(if 1 2 3)");
    assert!(matches!(err, Error::Bind(BindError::NonBooleanTest { found: Kind::Int })));
    assert_eq!(err.to_string(), "if condition is not a boolean, got int");
}

#[test]
fn lambda_values_print_their_arity() {
    assert_output("(lambda (x y) (+ x y))", "<lambda value with arity 2>\n");
}

#[test]
fn closures_can_be_rebound() {
    assert_output("(define f (lambda (x) (+ x 1))) (define g f) (g 1)", "2\n");
}

#[test]
fn closures_resolve_free_variables_where_they_were_defined() {
    let src = "(define n 1)
               (define f (lambda (x) (+ x n)))
               (define g (lambda (n) (f 10)))
               (g 100)";
    assert_output(src, "11\n");
}

#[test]
fn parameters_shadow_globals() {
    assert_output("(define x 1) (define f (lambda (x) (+ x 1))) (f 10) x", "11\n1\n");
}

#[test]
fn set_inside_closure_updates_the_defining_scope() {
    let src = "(define c 0)
               (define inc (lambda (d) (= (set c (+ c d)) 0)))
               (inc 5)
               c";
    assert_output(src, "false\n5\n");
}

#[test]
fn set_of_parameter_stays_local() {
    let src = "(define x 1) (define f (lambda (x) (= (set x 5) 0))) (f 10) x";
    assert_output(src, "false\n1\n");
}

#[test]
fn define_inside_closure_does_not_leak() {
    let src = "(define f (lambda (a) (= (define inner a) 0))) (f 1) inner";
    let (err, output) = failure_with_output(src);
    assert_eq!(output, "false\n");
    assert!(matches!(err, Error::Bind(BindError::UndefinedVariable { ref name }) if name == "inner"));
}

#[test]
fn double_define_fails() {
    let err = assert_failure("(define x 1) (define x 2)");
    assert_eq!(err.to_string(), "variable already defined: x");

    let err = assert_failure("(begin (define a 1) (define a 2))");
    assert!(matches!(err, Error::Bind(BindError::AlreadyDefined { .. })));
}

#[test]
fn define_whose_value_defines_the_same_name_fails() {
    let err = assert_failure("(define y (begin (define y 1) 2))");
    assert!(matches!(err, Error::Bind(BindError::AlreadyDefined { ref name }) if name == "y"));
}

#[test]
fn set_of_unknown_name_fails_without_output() {
    let (err, output) = failure_with_output("(set z 1)");
    assert!(output.is_empty());
    assert_eq!(err.to_string(), "variable not defined: z");
}

#[test]
fn unknown_variable_fails() {
    let err = assert_failure("x");
    assert!(matches!(err, Error::Bind(BindError::UndefinedVariable { .. })));
}

#[test]
fn unknown_function_fails() {
    let err = assert_failure("(undefined 1)");
    assert_eq!(err.to_string(), "function not defined: undefined");
}

#[test]
fn calling_a_non_closure_fails() {
    let err = assert_failure("(define x 1) (x)");
    assert!(matches!(err, Error::Bind(BindError::NotCallable { found: Kind::Int, .. })));
}

#[test]
fn host_arity_is_checked() {
    let err = assert_failure("(+ 1)");
    assert!(matches!(err,
                     Error::Bind(BindError::ArgumentCount { expected: ArgCount::AtLeast(2),
                                                            found: 1,
                                                            .. })));
    assert_eq!(err.to_string(), "wrong number of args for +: want at least 2, got 1");

    let err = assert_failure("(> 1 2 3)");
    assert_eq!(err.to_string(), "wrong number of args for >: want 2, got 3");
}

#[test]
fn closure_arity_is_checked() {
    let err = assert_failure("(define f (lambda (a b) (+ a b))) (f 1)");
    assert_eq!(err.to_string(), "wrong number of args for f: want 2, got 1");
}

#[test]
fn argument_kinds_are_checked() {
    let err = assert_failure("(+ 1 \"a\")");
    assert_eq!(err.to_string(), "incorrect argument type for +, expected int, got string");

    let err = assert_failure("(repeat \"ab\" -1)");
    assert!(matches!(err,
                     Error::Bind(BindError::ArgumentType { expected: Kind::Uint,
                                                           found: Kind::Int,
                                                           .. })));
    let err = assert_failure("(repeat \"ab\" (+ 1 2))");
    assert_eq!(err.to_string(), "incorrect argument type for repeat, expected uint, got int");
}

#[test]
fn host_failures_name_the_function() {
    let err = assert_failure("(/ 1 0)");
    assert!(matches!(err, Error::Host(_)));
    assert_eq!(err.to_string(), "error calling /: division by zero");

    let err = assert_failure("(+ 9223372036854775807 1)");
    assert_eq!(err.to_string(), "error calling +: integer overflow");
    assert!(!err.is_fatal());
}

#[test]
fn output_before_an_error_is_kept() {
    let (err, output) = failure_with_output("1 \"two\" (set z 3) 4");
    assert_eq!(output, "1\ntwo");
    assert!(matches!(err, Error::Bind(_)));
}

#[test]
fn empty_begin_is_a_syntax_error() {
    let err = assert_failure("(begin)");
    assert!(matches!(err, Error::Parse(ParseError::EmptyBegin { line: 1 })));
    assert!(err.to_string().contains("begin sentence without expressions"));
}

#[test]
fn syntax_errors_report_their_line() {
    let err = assert_failure("\n\n(begin)");
    assert!(matches!(err, Error::Parse(ParseError::EmptyBegin { line: 3 })));

    let err = assert_failure("(if #t 1 2 3)");
    assert_eq!(err.to_string(), "Error on line 1: expected ) in if; got number => 3.");
}

#[test]
fn incomplete_if_is_rejected() {
    let err = assert_failure("(if #t 1)");
    assert!(matches!(err, Error::Parse(ParseError::NotAnExpression { .. })));
}

#[test]
fn bad_literals_are_rejected() {
    let err = assert_failure("18446744073709551615");
    assert!(matches!(err, Error::Parse(ParseError::IllegalNumber { .. })));

    let err = assert_failure("#x");
    assert!(matches!(err, Error::Parse(ParseError::BadBool { .. })));

    let err = assert_failure(r#""\q""#);
    assert!(matches!(err, Error::Parse(ParseError::BadString { .. })));
}

#[test]
fn lexical_errors_are_reported() {
    let err = assert_failure("12a");
    assert_eq!(err.to_string(), "Error on line 1: bad number syntax: 12a.");

    let err = assert_failure("(foo");
    assert!(matches!(err, Error::Lex(LexError { line: 1, .. })));

    let err = assert_failure("\"abc");
    assert!(matches!(err, Error::Lex(_)));

    let err = assert_failure("()");
    assert!(err.to_string().contains("illegal function name"));
}

#[test]
fn syntax_errors_run_nothing() {
    let (err, output) = failure_with_output("1 2 (begin)");
    assert!(output.is_empty());
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn language_errors_are_not_fatal() {
    for src in ["(set z 1)", "(begin)", "12a", "(/ 1 0)"] {
        assert!(!assert_failure(src).is_fatal(), "{src}");
    }
    assert!(Error::from(FatalError::NestedList).is_fatal());
}

/// `(+ 1 (+ 1 ... 1))` nested `depth` calls deep.
fn nested_sum(depth: usize) -> String {
    format!("{}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth))
}

#[test]
fn deeply_nested_expressions_evaluate() {
    assert_output(&nested_sum(1_500), "1501\n");
}

#[test]
fn nesting_past_the_limit_is_a_syntax_error() {
    let err = assert_failure(&nested_sum(5_000));
    assert!(matches!(err,
                     Error::Parse(ParseError::TooDeep { limit: MAX_NESTING_DEPTH,
                                                        line:  1, })));
    assert!(!err.is_fatal());
}

#[test]
fn deep_recursion_runs() {
    assert_output("(define f (lambda (n) (+ 0 (if (= n 0) 0 (f (- n 1)))))) (f 3000)",
                  "0\n");
    assert_output("(define count (lambda (n) (concat \"\" (if (= n 0) \"done\\n\" (count (- n 1)))))) (count 5000)",
                  "done\n");
}

#[test]
fn runaway_recursion_is_an_error() {
    let err = assert_failure("(define loop (lambda (n) (loop n))) (loop 1)");
    assert!(matches!(&err,
                     Error::Bind(BindError::RecursionLimit { function, limit })
                         if function == "loop" && *limit == MAX_CALL_DEPTH));
    assert!(!err.is_fatal());
}

