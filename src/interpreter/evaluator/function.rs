use log::trace;

use crate::{
    ast::{Call, Node},
    error::{ArgCount, BindError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            environment::Environment,
        },
        value::{closure::Closure, core::Value},
    },
    util::stack::guarded,
};

impl Context {
    /// Evaluates a function call.
    ///
    /// The name is first looked up in the host registries of the chain. If
    /// none matches, it must be bound to a closure in scope.
    ///
    /// # Parameters
    /// - `call`: The call node.
    /// - `env`: The environment the call appears in; arguments are evaluated
    ///   here.
    ///
    /// # Errors
    /// - `BindError::UndefinedFunction` if the name is bound nowhere.
    /// - `BindError::NotCallable` if it is bound to something other than a
    ///   closure.
    /// - Any error from binding, the host function or the closure body.
    pub fn eval_call(&mut self, call: &Call, env: &Environment) -> EvalResult<Value> {
        self.count_call();

        if let Some(host) = env.host_function(&call.name) {
            trace!("calling host function {} with {} args", call.name, call.args.len());
            return self.call_host(&host, &call.args, env);
        }

        match env.lookup(&call.name) {
            Some(Value::Closure(closure)) => {
                trace!("calling closure {} with {} args", call.name, call.args.len());
                self.call_closure(&call.name, &closure, &call.args, env)
            },
            Some(other) => Err(BindError::NotCallable { name:  call.name.clone(),
                                                        found: other.kind(), }.into()),
            None => Err(BindError::UndefinedFunction { name: call.name.clone() }.into()),
        }
    }

    /// Invokes a closure.
    ///
    /// Arguments are evaluated left to right in the caller's environment and
    /// bound in a fresh scope whose parent is the closure's captured
    /// environment. The body runs in that scope, which is dropped on return
    /// unless something inside captured it.
    ///
    /// # Errors
    /// Returns `BindError::ArgumentCount` unless exactly one argument per
    /// parameter is given, `BindError::AlreadyDefined` for a repeated
    /// parameter name and `BindError::RecursionLimit` when too many closure
    /// calls are already in progress.
    fn call_closure(&mut self,
                    name: &str,
                    closure: &Closure,
                    args: &[Node],
                    caller: &Environment)
                    -> EvalResult<Value> {
        if args.len() != closure.arity() {
            return Err(BindError::ArgumentCount { function: name.to_string(),
                                                  expected: ArgCount::Exactly(closure.arity()),
                                                  found:    args.len(), }.into());
        }

        let scope = Environment::child(&closure.captured);
        for (param, arg) in closure.params.iter().zip(args) {
            let value = self.eval(arg, caller)?;
            scope.define(param, value)?;
        }

        self.enter_closure(name)?;
        let result = guarded(|| self.eval_call(&closure.body, &scope));
        self.leave_closure();
        result
    }
}
