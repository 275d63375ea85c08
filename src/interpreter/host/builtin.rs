use std::fmt::Write as _;

use crate::{
    interpreter::{
        host::registry::{HostFunction, HostResult, Registry, Signature},
        value::{core::Value, kind::Kind},
    },
    util::num::u64_to_usize_checked,
};

/// Longest string `repeat` will build, in bytes.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

type BuiltinFn = fn(&[Value]) -> HostResult;

/// Defines the builtin library as a static table and a name list.
///
/// Each entry provides:
/// - a name,
/// - the fixed parameter kinds,
/// - the variadic element kind, if any,
/// - the declared return kinds,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:expr),* $(,)?],
                variadic: $variadic:expr,
                returns: [$($ret:expr),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:     &'static str,
            params:   &'static [Kind],
            variadic: Option<Kind>,
            returns:  &'static [Kind],
            func:     BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name,
                             params: &[$($param),*],
                             variadic: $variadic,
                             returns: &[$($ret),*],
                             func: $func },
            )*
        ];
        /// Names of every builtin in the default registry.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "+"       => { params: [Kind::Int, Kind::Int], variadic: Some(Kind::Int), returns: [Kind::Int, Kind::Error], func: add },
    "-"       => { params: [Kind::Int], variadic: Some(Kind::Int), returns: [Kind::Int, Kind::Error], func: subtract },
    "*"       => { params: [Kind::Int, Kind::Int], variadic: Some(Kind::Int), returns: [Kind::Int, Kind::Error], func: multiply },
    "/"       => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Int, Kind::Error], func: divide },
    "%"       => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Int, Kind::Error], func: remainder },
    ">"       => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Bool], func: |args| compare(args, |a, b| a > b) },
    ">="      => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Bool], func: |args| compare(args, |a, b| a >= b) },
    "<"       => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Bool], func: |args| compare(args, |a, b| a < b) },
    "<="      => { params: [Kind::Int, Kind::Int], variadic: None, returns: [Kind::Bool], func: |args| compare(args, |a, b| a <= b) },
    "="       => { params: [Kind::Any, Kind::Any], variadic: None, returns: [Kind::Bool], func: equal },
    "not"     => { params: [Kind::Bool], variadic: None, returns: [Kind::Bool], func: not },
    "print"   => { params: [Kind::Str], variadic: Some(Kind::Any), returns: [Kind::Str], func: |args| print(args, false) },
    "println" => { params: [Kind::Str], variadic: Some(Kind::Any), returns: [Kind::Str], func: |args| print(args, true) },
    "concat"  => { params: [], variadic: Some(Kind::Str), returns: [Kind::Str], func: concat },
    "repeat"  => { params: [Kind::Str, Kind::Uint], variadic: None, returns: [Kind::Str, Kind::Error], func: repeat },
}

/// Builds a registry holding every builtin.
///
/// # Example
/// ```
/// use water::interpreter::host::builtin::{BUILTIN_FUNCTIONS, registry};
///
/// let registry = registry();
/// assert_eq!(registry.len(), BUILTIN_FUNCTIONS.len());
/// assert!(registry.contains("println"));
/// ```
#[must_use]
pub fn registry() -> Registry {
    let mut registry = Registry::default();
    for def in BUILTIN_TABLE {
        let signature = Signature { params:   def.params.to_vec(),
                                    variadic: def.variadic,
                                    returns:  def.returns.to_vec(), };
        registry.insert(HostFunction::new(def.name, signature, def.func));
    }
    registry
}

/// Collects integer arguments. The binding layer has already checked the
/// kinds, so a mismatch here means a signature and its body disagree.
fn ints(args: &[Value]) -> Result<Vec<i64>, String> {
    args.iter()
        .map(|value| value.as_int().ok_or_else(|| format!("expected int, got {}", value.kind())))
        .collect()
}

fn add(args: &[Value]) -> HostResult {
    ints(args)?.into_iter()
               .try_fold(0, i64::checked_add)
               .map(Value::Int)
               .ok_or_else(|| "integer overflow".into())
}

/// Negates a single operand, otherwise subtracts the rest from the first.
fn subtract(args: &[Value]) -> HostResult {
    let values = ints(args)?;
    let result = match values.as_slice() {
        [only] => only.checked_neg(),
        [first, rest @ ..] => rest.iter().try_fold(*first, |acc, x| acc.checked_sub(*x)),
        [] => None,
    };
    result.map(Value::Int).ok_or_else(|| "integer overflow".into())
}

fn multiply(args: &[Value]) -> HostResult {
    ints(args)?.into_iter()
               .try_fold(1, i64::checked_mul)
               .map(Value::Int)
               .ok_or_else(|| "integer overflow".into())
}

fn divide(args: &[Value]) -> HostResult {
    let values = ints(args)?;
    let [a, b] = values[..] else {
        return Err("expected two operands".into());
    };
    if b == 0 {
        return Err("division by zero".into());
    }
    a.checked_div(b).map(Value::Int).ok_or_else(|| "integer overflow".into())
}

fn remainder(args: &[Value]) -> HostResult {
    let values = ints(args)?;
    let [a, b] = values[..] else {
        return Err("expected two operands".into());
    };
    if b == 0 {
        return Err("division by zero".into());
    }
    a.checked_rem(b).map(Value::Int).ok_or_else(|| "integer overflow".into())
}

fn compare(args: &[Value], op: fn(i64, i64) -> bool) -> HostResult {
    let values = ints(args)?;
    let [a, b] = values[..] else {
        return Err("expected two operands".into());
    };
    Ok(Value::Bool(op(a, b)))
}

fn equal(args: &[Value]) -> HostResult {
    let [a, b] = args else {
        return Err("expected two operands".into());
    };
    Ok(Value::Bool(a == b))
}

fn not(args: &[Value]) -> HostResult {
    let Some(b) = args.first().and_then(Value::as_bool) else {
        return Err("expected one bool".into());
    };
    Ok(Value::Bool(!b))
}

fn print(args: &[Value], newline: bool) -> HostResult {
    let [Value::Str(template), rest @ ..] = args else {
        return Err("expected a format string".into());
    };
    let mut text = format_string(template, rest);
    if newline {
        text.push('\n');
    }
    Ok(Value::Str(text))
}

fn concat(args: &[Value]) -> HostResult {
    let text = args.iter()
                   .map(|value| value.as_str().ok_or_else(|| format!("expected string, got {}", value.kind())))
                   .collect::<Result<String, String>>()?;
    Ok(Value::Str(text))
}

fn repeat(args: &[Value]) -> HostResult {
    let (Some(text), Some(count)) = (args.first().and_then(Value::as_str),
                                     args.get(1).and_then(Value::as_uint))
    else {
        return Err("expected a string and a count".into());
    };
    let count = u64_to_usize_checked(count).ok_or("count too large")?;
    match text.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::Str(text.repeat(count))),
        _ => Err(format!("result longer than {MAX_REPEAT_LEN} bytes").into()),
    }
}

/// Renders a printf-style template.
///
/// `%v` prints any value, `%d` an integer, `%s` a string, `%t` a boolean and
/// `%%` a literal percent sign. A verb without a matching argument renders as
/// `%!v(MISSING)`, an argument of the wrong kind as `%!d(string=hi)`, and
/// leftover arguments are listed in a trailing `%!(EXTRA ...)`.
///
/// # Example
/// ```
/// use water::interpreter::{host::builtin::format_string, value::Value};
///
/// let text = format_string("%s is %d%%", &[Value::from("x"), Value::Int(5)]);
/// assert_eq!(text, "x is 5%");
/// assert_eq!(format_string("%d", &[]), "%!d(MISSING)");
/// ```
#[must_use]
pub fn format_string(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(verb @ ('v' | 'd' | 's' | 't')) => {
                let Some(value) = args.next() else {
                    let _ = write!(out, "%!{verb}(MISSING)");
                    continue;
                };
                let fits = match verb {
                    'd' => matches!(value, Value::Int(_) | Value::Uint(_)),
                    's' => matches!(value, Value::Str(_)),
                    't' => matches!(value, Value::Bool(_)),
                    _ => true,
                };
                if fits {
                    let _ = write!(out, "{value}");
                } else {
                    let _ = write!(out, "%!{verb}({}={value})", value.kind());
                }
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            },
            None => out.push('%'),
        }
    }

    let extra: Vec<String> = args.map(|value| format!("{}={value}", value.kind())).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }
    out
}
