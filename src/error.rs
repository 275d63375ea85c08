/// Lexing and parsing errors.
///
/// Defines the errors raised before evaluation starts: malformed tokens
/// reported by the lexer thread and grammar violations detected by the
/// parser. Both carry the source line where the problem was found.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while walking the tree: binding failures
/// (arity, kinds, scopes), failures reported by host functions, and fatal
/// interpreter invariant violations.
pub mod runtime_error;

use thiserror::Error;

pub use parse_error::{LexError, ParseError};
pub use runtime_error::{ArgCount, BindError, FatalError, HostError};

/// The single error value surfaced by [`crate::parse`] and [`crate::run`].
///
/// Every stage returns `Result` and the first failure unwinds straight to the
/// caller. `Fatal` is kept apart from the language-level kinds: it signals a
/// bug in the interpreter or in a host function, not in the program.
#[derive(Debug, Error)]
pub enum Error {
    /// A malformed token.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A grammar violation.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An arity, kind or scope failure while evaluating.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// A failure returned by a host function.
    #[error(transparent)]
    Host(#[from] HostError),
    /// An interpreter invariant was broken.
    #[error(transparent)]
    Fatal(#[from] FatalError),
    /// Reading the source or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` when the error signals an interpreter bug rather than a
    /// mistake in the interpreted program.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}
