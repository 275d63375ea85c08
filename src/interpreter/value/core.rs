use std::{fmt, rc::Rc};

use crate::interpreter::value::{closure::Closure, kind::Kind};

/// Represents a runtime value in the interpreter.
///
/// Values are produced by evaluating nodes and passed to and from host
/// functions. Cloning is cheap: strings are copied but closures are shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// No value. Produced by `define`, `set` and host functions without
    /// returns; never printed.
    #[default]
    Unit,
    /// A boolean, produced by `#t`/`#f` and comparisons. `if` tests must be
    /// booleans.
    Bool(bool),
    /// A signed integer. Every number literal evaluates to one.
    Int(i64),
    /// An unsigned integer. Only seen by and returned from host functions.
    Uint(u64),
    /// A string.
    Str(String),
    /// A closure built by `lambda`. Equality is identity.
    Closure(Rc<Closure>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl Value {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Unit => Kind::Unit,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Str(_) => Kind::Str,
            Self::Closure(_) => Kind::Closure,
        }
    }

    /// The boolean inside, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The signed integer inside, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The unsigned integer inside, if any.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// The string inside, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Formats a value the way the interpreter prints it: strings verbatim,
    /// booleans as `true`/`false`, closures by arity, `Unit` as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Closure(closure) => write!(f, "<lambda value with arity {}>", closure.arity()),
        }
    }
}
