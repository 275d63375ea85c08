/// Core parsing logic.
///
/// Holds the `Parser` itself: token look-ahead with a one-slot pushback,
/// `expect`, the program loop and expression dispatch.
pub mod core;

/// Call parsing.
///
/// Parses parenthesised calls and the reserved forms `define`, `set`, `if`,
/// `begin` and `lambda`.
pub mod call;

/// Literal parsing.
///
/// Turns number, string, boolean and variable tokens into nodes, resolving
/// number bases, string escapes and boolean spellings on the way.
pub mod literal;

pub use self::core::{MAX_NESTING_DEPTH, ParseResult, Parser, parse_program};
