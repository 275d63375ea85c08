use expect_test::{Expect, expect};
use water::{
    interpreter::lexer::{Token, TokenKind, lex, tokenize},
    util::num::{parse_integer_literal, signed_reading, unsigned_reading},
};

fn tokens(src: &str) -> Vec<Token> {
    tokenize(src).expect("lexer thread starts")
}

fn check(src: &str, expected: Expect) {
    let dump: String = tokens(src).iter()
                                  .map(|t| {
                                      format!("{:?} {:?} {}..{} line {}\n",
                                              t.kind, t.text, t.span.start, t.span.end, t.line)
                                  })
                                  .collect();
    expected.assert_eq(&dump);
}

fn kinds(src: &str) -> Vec<TokenKind> {
    tokens(src).into_iter().map(|t| t.kind).collect()
}

#[test]
fn simple_call() {
    check("(+ 1 x)",
          expect![[r##"
              LeftParen "(" 0..1 line 1
              Call "+" 1..2 line 1
              Number "1" 3..4 line 1
              Variable "x" 5..6 line 1
              RightParen ")" 6..7 line 1
              Eof "" 7..7 line 1
          "##]]);
}

#[test]
fn signs_start_numbers_only_before_digits() {
    check("(- -5 - +x)",
          expect![[r##"
              LeftParen "(" 0..1 line 1
              Call "-" 1..2 line 1
              Number "-5" 3..5 line 1
              Variable "-" 6..7 line 1
              Variable "+x" 8..10 line 1
              RightParen ")" 10..11 line 1
              Eof "" 11..11 line 1
          "##]]);
}

#[test]
fn define_bools_strings_and_lines() {
    check("(define t #t)\n(if t 'a' \"b\")",
          expect![[r##"
              LeftParen "(" 0..1 line 1
              Define "define" 1..7 line 1
              Variable "t" 8..9 line 1
              Bool "#t" 10..12 line 1
              RightParen ")" 12..13 line 1
              LeftParen "(" 14..15 line 2
              Call "if" 15..17 line 2
              Variable "t" 18..19 line 2
              String "'a'" 20..23 line 2
              String "\"b\"" 24..27 line 2
              RightParen ")" 27..28 line 2
              Eof "" 28..28 line 2
          "##]]);
}

#[test]
fn malformed_number() {
    check("12a",
          expect![[r##"
              Error "bad number syntax: 12a" 0..3 line 1
          "##]]);
}

#[test]
fn eof_inside_call_name() {
    check("(foo",
          expect![[r##"
              LeftParen "(" 0..1 line 1
              Error "eof not expected inside a method call" 1..4 line 1
          "##]]);
}

#[test]
fn empty_call_name() {
    check("()",
          expect![[r##"
              LeftParen "(" 0..1 line 1
              Error "illegal function name" 1..1 line 1
          "##]]);
}

#[test]
fn unterminated_string() {
    check("\"ab",
          expect![[r##"
              Error "eof not expected inside a string" 0..3 line 1
          "##]]);
}

#[test]
fn define_needs_a_delimiter() {
    assert_eq!(kinds("(defined x)"),
               [TokenKind::LeftParen,
                TokenKind::Call,
                TokenKind::Variable,
                TokenKind::RightParen,
                TokenKind::Eof]);
    assert_eq!(kinds("(define)"),
               [TokenKind::LeftParen, TokenKind::Define, TokenKind::RightParen, TokenKind::Eof]);
    assert_eq!(kinds("(  define x 1)")[1], TokenKind::Define);
}

#[test]
fn escaped_delimiter_does_not_close_a_string() {
    let tokens = tokens(r#""a\"b" c"#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, r#""a\"b""#);
    assert_eq!(tokens[1].kind, TokenKind::Variable);
    assert_eq!(tokens[1].text, "c");
}

#[test]
fn hex_numbers() {
    let tokens = tokens("0x1F -0Xff 0x");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["0x1F", "-0Xff", "0x", ""]);
    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn number_running_into_a_name_is_an_error() {
    for src in ["0x1g", "1_000", "3abc"] {
        let tokens = tokens(src);
        assert_eq!(tokens.len(), 1, "{src}");
        assert_eq!(tokens[0].kind, TokenKind::Error, "{src}");
        assert!(tokens[0].text.starts_with("bad number syntax"), "{src}");
    }
}

#[test]
fn stream_ends_with_exactly_one_eof() {
    let tokens = tokens("(a (b c) \"d\")\n\n  e ");
    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn stream_is_fused_after_an_error() {
    let mut stream = lex("(ok) 12a (never seen)").expect("lexer thread starts");
    let kinds: Vec<TokenKind> = stream.by_ref().map(|t| t.kind).collect();
    assert_eq!(kinds.last(), Some(&TokenKind::Error));
    assert!(stream.next().is_none());
}

#[test]
fn dropping_the_stream_early_is_fine() {
    let source = "(+ 1 2) ".repeat(10_000);
    let mut stream = lex(source).expect("lexer thread starts");
    assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::LeftParen));
    assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::Call));
    drop(stream);
}

#[test]
fn spans_and_lines_round_trip() {
    let sources = ["(define greeting \"héllo wörld\")\n(println '%s' greeting)",
                   "(+ -1\n   +2\n   0x10)",
                   "\t(f #t #f)\r\n(g 'x\\'y')",
                   "(define λ (lambda (a b) (+ a b)))\n(λ 1 2)"];

    for src in sources {
        for token in tokens(src) {
            if token.kind == TokenKind::Eof {
                assert_eq!(token.span.end, src.len(), "{src}");
                continue;
            }
            assert_ne!(token.kind, TokenKind::Error, "{src}");
            assert_eq!(src[token.span.clone()].trim(), token.text, "{src}");

            let line = 1 + src[..token.span.start].matches('\n').count();
            assert_eq!(token.line, line, "{src}: {token}");
        }
    }
}

#[test]
fn accepted_numbers_have_agreeing_readings() {
    let src = "0 7 -7 +7 0x7fffffffffffffff -9223372036854775807 0XAB -0x1";
    for token in tokens(src).into_iter().filter(|t| t.kind == TokenKind::Number) {
        let value = parse_integer_literal(&token.text).expect("literal is accepted");
        let signed = signed_reading(&token.text).expect("signed reading");
        let unsigned = unsigned_reading(&token.text).expect("unsigned reading");
        assert_eq!(value, signed);
        #[allow(clippy::cast_sign_loss)]
        let bits = signed as u64;
        assert_eq!(bits, unsigned, "{}", token.text);
    }
}

#[test]
fn token_display_names_kind_and_text() {
    let tokens = tokens("(f 4)");
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["( => (", "call => f", "number => 4", ") => )", "EOF => "]);
}
