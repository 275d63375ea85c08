//! # water
//!
//! water is a small S-expression language written in Rust. Source text is
//! tokenized by a state-machine lexer running on its own thread, parsed by a
//! recursive-descent parser and executed by a tree-walking evaluator that
//! calls into functions supplied by the host program.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::Context,
        host::{builtin, registry::Registry},
        lexer::lex,
        parser::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The tree is built by the
/// parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines a node for every literal, reserved form and call.
/// - Keeps number literals as written next to their decoded value.
/// - Shares lambda bodies with the closures built from them.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// binding or evaluating code, and the crate-wide `Error` wrapping them.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator,
///   host functions).
/// - Attaches line numbers to lexical and syntax errors.
/// - Keeps interpreter invariant violations apart from program errors.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, host functions and
/// value representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, host
///   registry and value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities: integer literals, lossless conversions and stack growth.
pub mod util;

pub use error::Error;

/// Parses source text into a program tree.
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// # Examples
/// ```
/// use water::{ast::Node, parse};
///
/// let Node::List { children } = parse("(define x 1) x").unwrap() else {
///     panic!("expected a program list");
/// };
/// assert_eq!(children.len(), 2);
///
/// assert!(parse("(begin)").is_err());
/// ```
pub fn parse(source: &str) -> Result<Node, Error> {
    parse_program(lex(source)?)
}

/// Runs a program against the default primitive library.
///
/// Every top-level expression is evaluated in order. Results other than
/// unit are written to `output`: strings verbatim, anything else followed by
/// a newline.
///
/// # Errors
/// Returns the first error. Output written before it is kept.
///
/// # Examples
/// ```
/// use water::run;
///
/// let mut output = Vec::new();
/// run("(define x 10) (if #t (+ x 5) 0)", &mut output).unwrap();
/// assert_eq!(output, b"15\n");
///
/// let mut output = Vec::new();
/// assert!(run("(set z 1)", &mut output).is_err());
/// assert!(output.is_empty());
/// ```
pub fn run<W>(source: &str, output: &mut W) -> Result<(), Error>
    where W: Write + ?Sized
{
    run_with_registry(source, builtin::registry(), output)
}

/// Runs a program against a caller-supplied host function registry.
///
/// # Errors
/// Returns the first error. Output written before it is kept.
pub fn run_with_registry<W>(source: &str, registry: Registry, output: &mut W) -> Result<(), Error>
    where W: Write + ?Sized
{
    let program = parse(source)?;
    Context::new(registry).exec(&program, output)
}
