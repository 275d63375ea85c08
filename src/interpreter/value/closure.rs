use std::{fmt, rc::Rc};

use crate::{ast::Call, interpreter::evaluator::environment::Environment};

/// A function value created by evaluating a `lambda`.
///
/// The body is shared with the tree and with every other closure built from
/// the same lambda. `captured` is the environment the lambda was evaluated
/// in; calls resolve free variables through it.
pub struct Closure {
    /// The parameter names, in order.
    pub params:   Vec<String>,
    /// The single call making up the body.
    pub body:     Rc<Call>,
    /// The defining environment.
    pub captured: Environment,
}

impl Closure {
    /// The number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Closure {}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("params", &self.params)
         .field("body", &self.body.name)
         .finish_non_exhaustive()
    }
}
