use std::fmt;

use thiserror::Error;

use crate::interpreter::value::kind::Kind;

/// The argument count a callee wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgCount {
    /// A closure or a non-variadic host function.
    Exactly(usize),
    /// A variadic host function with this many fixed parameters.
    AtLeast(usize),
}

impl fmt::Display for ArgCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Errors raised while binding names, arguments and results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Read or `set` of a name bound nowhere in the scope chain.
    #[error("variable not defined: {name}")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// `define` of a name already bound in the innermost scope.
    #[error("variable already defined: {name}")]
    AlreadyDefined {
        /// The name of the variable.
        name: String,
    },
    /// Call of a name that is neither a host function nor bound.
    #[error("function not defined: {name}")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// Call of a name bound to something other than a closure.
    #[error("function not defined: {name} is bound to a {found} value")]
    NotCallable {
        /// The name that was called.
        name:  String,
        /// The kind of the value bound to it.
        found: Kind,
    },
    /// Wrong number of arguments for a host function or closure.
    #[error("wrong number of args for {function}: want {expected}, got {found}")]
    ArgumentCount {
        /// The callee.
        function: String,
        /// What the callee accepts.
        expected: ArgCount,
        /// How many arguments the call site passed.
        found:    usize,
    },
    /// An argument whose kind does not fit the declared parameter.
    #[error("incorrect argument type for {function}, expected {expected}, got {found}")]
    ArgumentType {
        /// The callee.
        function: String,
        /// The declared parameter kind.
        expected: Kind,
        /// The kind of the evaluated argument.
        found:    Kind,
    },
    /// A host signature whose return shape is not `[]`, `[k]`, `[error]` or
    /// `[k, error]`.
    #[error("can't handle multiple returns from function {function}")]
    MultipleReturns {
        /// The callee.
        function: String,
    },
    /// An `if` test that did not produce a boolean.
    #[error("if condition is not a boolean, got {found}")]
    NonBooleanTest {
        /// The kind the test produced.
        found: Kind,
    },
    /// Closure calls nested deeper than the interpreter allows.
    #[error("maximum call depth of {limit} exceeded calling {function}")]
    RecursionLimit {
        /// The closure whose call went over the limit.
        function: String,
        /// The maximum number of nested closure calls.
        limit:    usize,
    },
    /// A host function registered under a grammar keyword.
    #[error("cannot register host function under the reserved name {name}")]
    ReservedName {
        /// The rejected name.
        name: String,
    },
}

/// A failure reported by a host function through its error return.
#[derive(Debug, Error)]
#[error("error calling {function}: {source}")]
pub struct HostError {
    /// The host function that failed.
    pub function: String,
    /// The error it returned.
    pub source:   Box<dyn std::error::Error + Send + Sync>,
}

/// Interpreter invariant violations.
///
/// None of these can be caused by the interpreted program alone; they point
/// at a bug in the interpreter or at a host function breaking its declared
/// signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The lexer thread went away without sending `EOF` or an error token.
    #[error("internal error: token stream closed before EOF")]
    TokenStreamClosed,
    /// A host function failed although its signature declares no error return.
    #[error("internal error: host function {function} failed without declaring an error return: {message}")]
    UndeclaredFailure {
        /// The host function.
        function: String,
        /// The failure it returned.
        message:  String,
    },
    /// A host function returned a value of a kind it did not declare.
    #[error("internal error: host function {function} returned a {found} value, declared {expected}")]
    ReturnKind {
        /// The host function.
        function: String,
        /// The declared return kind.
        expected: Kind,
        /// The kind actually returned.
        found:    Kind,
    },
    /// A program list showed up below the root.
    #[error("internal error: cannot evaluate a nested program list")]
    NestedList,
}
