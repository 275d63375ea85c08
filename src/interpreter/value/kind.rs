use std::fmt;

/// The primitive kind of a value, or of a slot in a host function signature.
///
/// `Any` and `Error` only appear in signatures: `Any` accepts every value and
/// `Error` marks the optional failure return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Accepts every value.
    Any,
    /// No value.
    Unit,
    /// `#t` / `#f`.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit unsigned integer.
    Uint,
    /// Text.
    Str,
    /// A lambda closure.
    Closure,
    /// The failure return of a host function.
    Error,
}

impl Kind {
    /// Returns `true` if a value of kind `found` fits a slot of this kind
    /// without conversion.
    #[must_use]
    pub fn admits(self, found: Self) -> bool {
        self == Self::Any || self == found
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Str => "string",
            Self::Closure => "lambda",
            Self::Error => "error",
        };
        write!(f, "{name}")
    }
}
