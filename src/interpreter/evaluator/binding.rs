use crate::{
    ast::{Node, NumberLiteral},
    error::{BindError, FatalError, HostError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            environment::Environment,
        },
        host::registry::HostFunction,
        value::{core::Value, kind::Kind},
    },
};

impl Context {
    /// Calls a host function with the argument nodes of a call site.
    ///
    /// Steps, each failing fast:
    /// 1. the argument count must fit the signature;
    /// 2. the return shape must be `[]`, `[k]`, `[Error]` or `[k, Error]`;
    /// 3. each argument is evaluated in `env` and checked against its
    ///    declared kind with [`bind_argument`]. A number literal passed to a
    ///    `Uint` slot is read as unsigned instead;
    /// 4. the function runs. A failure becomes a `HostError` if the
    ///    signature declares one, and is fatal otherwise;
    /// 5. a declared value must come back with the declared kind. Without a
    ///    declared value the result is `Unit`.
    ///
    /// # Errors
    /// Returns a `BindError`, a `HostError` or a `FatalError` as described
    /// above.
    pub(crate) fn call_host(&mut self,
                            host: &HostFunction,
                            args: &[Node],
                            env: &Environment)
                            -> EvalResult<Value> {
        let name = host.name();
        let signature = host.signature();

        signature.check_arity(name, args.len())?;
        let (returns, fallible) = signature.return_shape(name)?;

        let mut values = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            let expected = signature.param(index).unwrap_or(Kind::Any);
            let value = match arg {
                Node::Number(literal) if expected == Kind::Uint => unsigned_literal(name, literal)?,
                _ => bind_argument(name, expected, self.eval(arg, env)?)?,
            };
            values.push(value);
        }

        let result = match host.invoke(&values) {
            Ok(value) => value,
            Err(source) if fallible => {
                return Err(HostError { function: name.to_string(),
                                       source }.into());
            },
            Err(source) => {
                return Err(FatalError::UndeclaredFailure { function: name.to_string(),
                                                           message:  source.to_string(), }.into());
            },
        };

        match returns {
            None => Ok(Value::Unit),
            Some(expected) if expected.admits(result.kind()) => Ok(result),
            Some(expected) => Err(FatalError::ReturnKind { function: name.to_string(),
                                                           expected,
                                                           found: result.kind() }.into()),
        }
    }
}

/// Checks an evaluated argument against a declared parameter kind.
///
/// The kinds must match exactly, except that an `Any` slot accepts every
/// value. A computed `Int` does not fit a `Uint` slot; only a number literal
/// written at the call site is converted, and that happens before
/// evaluation.
///
/// # Parameters
/// - `function`: The callee, for the error message.
/// - `expected`: The declared kind.
/// - `value`: The evaluated argument.
///
/// # Errors
/// Returns `BindError::ArgumentType` if the value does not fit.
///
/// # Example
/// ```
/// use water::interpreter::{
///     evaluator::binding::bind_argument,
///     value::{Kind, Value},
/// };
///
/// assert_eq!(bind_argument("f", Kind::Any, Value::Int(3)).unwrap(), Value::Int(3));
/// assert_eq!(bind_argument("f", Kind::Uint, Value::Uint(3)).unwrap(), Value::Uint(3));
/// assert!(bind_argument("f", Kind::Uint, Value::Int(3)).is_err());
/// assert!(bind_argument("f", Kind::Str, Value::Int(3)).is_err());
/// ```
pub fn bind_argument(function: &str, expected: Kind, value: Value) -> Result<Value, BindError> {
    let found = value.kind();
    if expected.admits(found) {
        Ok(value)
    } else {
        Err(BindError::ArgumentType { function: function.to_string(),
                                      expected,
                                      found })
    }
}

/// Reads a signed number literal into a `Uint` slot. Negative literals do
/// not fit.
fn unsigned_literal(function: &str, literal: &NumberLiteral) -> Result<Value, BindError> {
    let Some(value) = literal.as_unsigned() else {
        return Err(BindError::ArgumentType { function: function.to_string(),
                                             expected: Kind::Uint,
                                             found:    Kind::Int, });
    };
    Ok(Value::Uint(value))
}
