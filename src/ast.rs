use std::rc::Rc;

use crate::util::num::{i64_to_u64_checked, parse_integer_literal};

/// An integer literal as written in the source and as read by the parser.
///
/// Only the signed value is stored. The unsigned view is derived on demand,
/// when a host function declares an unsigned parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLiteral {
    /// The literal text, sign and `0x` prefix included.
    pub text:  String,
    /// The signed reading.
    pub value: i64,
}

impl NumberLiteral {
    /// Reads `text` as an integer literal.
    ///
    /// Returns `None` if the signed and unsigned readings fail or disagree.
    ///
    /// # Example
    /// ```
    /// use water::ast::NumberLiteral;
    ///
    /// let literal = NumberLiteral::parse("-0x2A").unwrap();
    /// assert_eq!(literal.value, -42);
    /// assert_eq!(literal.as_unsigned(), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        parse_integer_literal(text).map(|value| Self { text: text.to_string(),
                                                       value })
    }

    /// The unsigned view of the literal, if it is not negative.
    #[must_use]
    pub fn as_unsigned(&self) -> Option<u64> {
        i64_to_u64_checked(self.value)
    }
}

/// A function call: `(name args...)`.
///
/// Also used as the body of a `lambda`, which must be exactly one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name in call position.
    pub name: String,
    /// The argument expressions, in source order.
    pub args: Vec<Node>,
}

/// An abstract syntax tree node.
///
/// The tree is built once by the parser and never changes afterwards. Every
/// node is owned by its parent except lambda bodies, which are shared with
/// the closures created from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The program root: every top-level expression in order.
    List {
        /// The top-level expressions.
        children: Vec<Node>,
    },
    /// An ordinary function call.
    Call(Call),
    /// `(define name value)`: binds a new name in the innermost scope.
    Define {
        /// The name to bind.
        name:  String,
        /// The bound expression.
        value: Box<Node>,
    },
    /// `(set name value)`: rebinds a name already bound somewhere in the chain.
    Set {
        /// The name to rebind.
        name:  String,
        /// The new value expression.
        value: Box<Node>,
    },
    /// `(if test conseq alt)`.
    If {
        /// Must evaluate to a boolean.
        test:   Box<Node>,
        /// Evaluated when the test is true.
        conseq: Box<Node>,
        /// Evaluated when the test is false.
        alt:    Box<Node>,
    },
    /// `(begin expr...)`: evaluates in order and yields the last value.
    Begin {
        /// At least one expression.
        body: Vec<Node>,
    },
    /// A variable reference.
    Var {
        /// The referenced name.
        name: String,
    },
    /// An integer literal.
    Number(NumberLiteral),
    /// A string literal with its escapes resolved.
    Str {
        /// The unquoted contents.
        text: String,
    },
    /// `#t` or `#f`.
    Bool {
        /// The literal value.
        value: bool,
    },
    /// `(lambda (params...) (body))`.
    Lambda {
        /// The parameter names.
        params: Vec<String>,
        /// The single call making up the body.
        body:   Rc<Call>,
    },
}
