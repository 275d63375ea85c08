use thiserror::Error;

use crate::interpreter::lexer::TokenKind;

/// A malformed token reported by the lexer.
///
/// The lexer thread sends an `Error` token and stops; the parser turns that
/// token into this value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: {message}.")]
pub struct LexError {
    /// What the lexer rejected, e.g. `bad number syntax: 12a`.
    pub message: String,
    /// The source line where the error occurred.
    pub line:    usize,
}

/// Represents all errors that can occur while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token of the wrong kind inside a construct.
    #[error("Error on line {line}: expected {expected} in {context}; got {found}.")]
    UnexpectedToken {
        /// The kind the construct needed.
        expected: TokenKind,
        /// The construct being parsed (`call`, `define`, `if`, ...).
        context:  &'static str,
        /// The offending token, rendered as `kind => text`.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A token that cannot start an expression.
    #[error("Error on line {line}: cannot use this kind of value as an expression: {found}.")]
    NotAnExpression {
        /// The offending token, rendered as `kind => text`.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A number whose signed and unsigned readings disagree or fail.
    #[error("Error on line {line}: illegal number syntax: {text}.")]
    IllegalNumber {
        /// The literal as written.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal with a broken escape sequence.
    #[error("Error on line {line}: cannot unquote the string literal {text}: {reason}.")]
    BadString {
        /// The literal as written, quotes included.
        text:   String,
        /// Why unquoting failed.
        reason: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `#` word other than `#t` or `#f`.
    #[error("Error on line {line}: incorrect boolean value, should be #t or #f: {text}.")]
    BadBool {
        /// The word as written.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `begin` form with nothing inside.
    #[error("Error on line {line}: begin sentence without expressions.")]
    EmptyBegin {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Expressions nested past the parser's depth limit.
    #[error("Error on line {line}: expressions nested deeper than {limit} levels.")]
    TooDeep {
        /// The maximum nesting depth.
        limit: usize,
        /// The source line where the limit was hit.
        line:  usize,
    },
    /// A `lambda` whose body is not a plain function call.
    #[error("Error on line {line}: lambda body must be a function call.")]
    LambdaBody {
        /// The source line where the error occurred.
        line: usize,
    },
}
