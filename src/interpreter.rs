/// The evaluator module executes the syntax tree.
///
/// The evaluator walks the tree built by the parser inside lexically nested
/// environments, creates closures, dispatches calls to host functions or
/// closures, and writes top-level results to the output sink.
///
/// # Responsibilities
/// - Evaluates every node kind, including `define`, `set`, `if`, `begin` and
///   `lambda`.
/// - Binds call-site arguments to host function signatures.
/// - Reports scope, arity and kind errors.
pub mod evaluator;
/// The host module describes functions supplied by the embedding program.
///
/// A host function is a declared signature plus a callable. The registry
/// holding them is attached to the global environment and consulted before
/// closures.
///
/// # Responsibilities
/// - Defines `Signature`, `HostFunction` and `Registry`.
/// - Rejects registration under reserved names.
/// - Ships the default primitive library.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer is a state machine in which each state scans some input and
/// returns the next state. It runs on its own thread and hands tokens to the
/// parser one at a time over a rendezvous channel.
///
/// # Responsibilities
/// - Converts source text into typed tokens with span and line.
/// - Tells signed numbers apart from names starting with `+` or `-`.
/// - Reports lexical errors for malformed input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive-descent parser with one token of look-ahead. Reserved call
/// forms get their own nodes; literals are decoded while nodes are built.
///
/// # Responsibilities
/// - Converts the token stream into `Node`s.
/// - Validates the grammar, reporting errors with line information.
/// - Decodes number bases, string escapes and boolean spellings.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares `Value`, the kinds used by host function signatures, and
/// closures.
///
/// # Responsibilities
/// - Defines the `Value` enum and its display form.
/// - Defines `Kind` for values and signature slots.
/// - Defines `Closure`, a lambda paired with its defining environment.
pub mod value;
