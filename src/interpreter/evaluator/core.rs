use std::{io::Write, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::Node,
    error::{BindError, Error, FatalError},
    interpreter::{
        evaluator::environment::Environment,
        host::registry::Registry,
        value::{closure::Closure, core::Value},
    },
    util::stack::guarded,
};

/// How many closure calls may be in progress at once.
pub const MAX_CALL_DEPTH: usize = 10_000;

/// Result type used by the evaluator.
///
/// Evaluation fails with any of the crate's error kinds: binding, host and
/// fatal errors directly, I/O errors while printing.
pub type EvalResult<T> = Result<T, Error>;

/// Stores the runtime evaluation context.
///
/// Holds the global environment, which carries the host registry, the
/// number of calls dispatched so far and the current closure call depth. A
/// context can run several programs in turn; definitions made by one stay
/// visible to the next.
#[derive(Debug)]
pub struct Context {
    globals: Environment,
    calls:   usize,
    depth:   usize,
}

impl Context {
    /// Creates a context whose global scope uses `registry` for host
    /// functions.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        debug!("host functions: {}", registry.names().join(" "));
        Self { globals: Environment::global(Rc::new(registry)),
               calls:   0,
               depth:   0, }
    }

    /// The global environment.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.globals
    }

    /// The number of function calls dispatched so far.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    /// Runs a program and writes every non-unit top-level result to `output`.
    ///
    /// Strings are written verbatim, every other value followed by a newline.
    /// Execution stops at the first error; anything printed before it stays
    /// printed.
    ///
    /// # Parameters
    /// - `program`: A `Node::List` root, or a single expression.
    /// - `output`: Where results go.
    ///
    /// # Errors
    /// Returns the first evaluation error, or an I/O error from `output`.
    pub fn exec<W>(&mut self, program: &Node, output: &mut W) -> EvalResult<()>
        where W: Write + ?Sized
    {
        let globals = self.globals.clone();
        let expressions = match program {
            Node::List { children } => children.as_slice(),
            other => std::slice::from_ref(other),
        };

        for node in expressions {
            let value = self.eval(node, &globals)?;
            print_value(&value, output)?;
        }
        debug!("program finished after {} calls", self.calls);

        Ok(())
    }

    /// Evaluates a node in the given environment.
    ///
    /// # Errors
    /// Returns a `BindError` for scope, arity and kind failures, a
    /// `HostError` when a host function fails, and a `FatalError` if a
    /// program list appears below the root.
    pub fn eval(&mut self, node: &Node, env: &Environment) -> EvalResult<Value> {
        guarded(|| self.eval_inner(node, env))
    }

    fn eval_inner(&mut self, node: &Node, env: &Environment) -> EvalResult<Value> {
        match node {
            Node::Number(literal) => Ok(Value::Int(literal.value)),
            Node::Str { text } => Ok(Value::Str(text.clone())),
            Node::Bool { value } => Ok(Value::Bool(*value)),
            Node::Var { name } => {
                env.lookup(name)
                   .ok_or_else(|| BindError::UndefinedVariable { name: name.clone() }.into())
            },
            Node::Define { name, value } => self.eval_define(name, value, env),
            Node::Set { name, value } => self.eval_set(name, value, env),
            Node::If { test, conseq, alt } => self.eval_if(test, conseq, alt, env),
            Node::Begin { body } => self.eval_begin(body, env),
            Node::Lambda { params, body } => {
                let closure = Closure { params:   params.clone(),
                                        body:     Rc::clone(body),
                                        captured: env.clone(), };
                Ok(Value::Closure(Rc::new(closure)))
            },
            Node::Call(call) => self.eval_call(call, env),
            Node::List { .. } => Err(FatalError::NestedList.into()),
        }
    }

    /// Binds a new name in the innermost scope. The name is checked before
    /// and after evaluating the value, since the value expression may itself
    /// define it.
    fn eval_define(&mut self, name: &str, value: &Node, env: &Environment) -> EvalResult<Value> {
        if env.is_local(name) {
            return Err(BindError::AlreadyDefined { name: name.to_string() }.into());
        }
        let value = self.eval(value, env)?;
        env.define(name, value)?;
        trace!("defined {name}");

        Ok(Value::Unit)
    }

    /// Rebinds an existing name. The value is only evaluated once the name is
    /// known to exist.
    fn eval_set(&mut self, name: &str, value: &Node, env: &Environment) -> EvalResult<Value> {
        if env.lookup(name).is_none() {
            return Err(BindError::UndefinedVariable { name: name.to_string() }.into());
        }
        let value = self.eval(value, env)?;
        env.assign(name, value)?;

        Ok(Value::Unit)
    }

    /// Evaluates the test, then only the branch it selects.
    fn eval_if(&mut self,
               test: &Node,
               conseq: &Node,
               alt: &Node,
               env: &Environment)
               -> EvalResult<Value> {
        match self.eval(test, env)? {
            Value::Bool(true) => self.eval(conseq, env),
            Value::Bool(false) => self.eval(alt, env),
            other => Err(BindError::NonBooleanTest { found: other.kind() }.into()),
        }
    }

    fn eval_begin(&mut self, body: &[Node], env: &Environment) -> EvalResult<Value> {
        let mut last = Value::Unit;
        for node in body {
            last = self.eval(node, env)?;
        }
        Ok(last)
    }

    pub(crate) const fn count_call(&mut self) {
        self.calls += 1;
    }

    /// Enters one more closure call.
    ///
    /// # Errors
    /// Returns `BindError::RecursionLimit` once [`MAX_CALL_DEPTH`] calls are
    /// already in progress.
    pub(crate) fn enter_closure(&mut self, function: &str) -> Result<(), BindError> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(BindError::RecursionLimit { function: function.to_string(),
                                                   limit:    MAX_CALL_DEPTH, });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) const fn leave_closure(&mut self) {
        self.depth -= 1;
    }
}

/// Writes a top-level result: nothing for `Unit`, strings as they are, any
/// other value on its own line.
fn print_value<W>(value: &Value, output: &mut W) -> EvalResult<()>
    where W: Write + ?Sized
{
    match value {
        Value::Unit => {},
        Value::Str(text) => output.write_all(text.as_bytes())?,
        other => writeln!(output, "{other}")?,
    }
    Ok(())
}
