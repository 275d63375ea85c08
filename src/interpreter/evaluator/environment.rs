use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::BindError,
    interpreter::{
        host::registry::{HostFunction, Registry},
        value::core::Value,
    },
};

#[derive(Default)]
struct Frame {
    bindings: HashMap<String, Value>,
    registry: Option<Rc<Registry>>,
    outer:    Option<Environment>,
}

/// A scope in the environment chain.
///
/// Cloning the handle shares the scope. Lookups walk outwards from the
/// innermost scope; definitions always land in the innermost one. No borrow
/// of a scope outlives a single method call, so evaluation may recurse
/// freely while holding handles.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// The global scope, carrying the host function registry.
    #[must_use]
    pub fn global(registry: Rc<Registry>) -> Self {
        Self(Rc::new(RefCell::new(Frame { registry: Some(registry),
                                          ..Frame::default() })))
    }

    /// A fresh scope nested inside `outer`.
    #[must_use]
    pub fn child(outer: &Self) -> Self {
        Self(Rc::new(RefCell::new(Frame { outer: Some(outer.clone()),
                                          ..Frame::default() })))
    }

    /// Looks `name` up, innermost scope first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        match frame.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => frame.outer.as_ref().and_then(|outer| outer.lookup(name)),
        }
    }

    /// Returns `true` if `name` is bound in this scope itself.
    #[must_use]
    pub fn is_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Binds a new name in this scope.
    ///
    /// # Errors
    /// Returns `BindError::AlreadyDefined` if this scope already binds it.
    /// Outer scopes may hold the same name; the new binding shadows them.
    pub fn define(&self, name: &str, value: Value) -> Result<(), BindError> {
        let mut frame = self.0.borrow_mut();
        if frame.bindings.contains_key(name) {
            return Err(BindError::AlreadyDefined { name: name.to_string() });
        }
        frame.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Overwrites the binding of `name` in the innermost scope that holds it.
    ///
    /// # Errors
    /// Returns `BindError::UndefinedVariable` if no scope in the chain binds
    /// it.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), BindError> {
        let mut frame = self.0.borrow_mut();
        if let Some(slot) = frame.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &frame.outer {
            Some(outer) => outer.assign(name, value),
            None => Err(BindError::UndefinedVariable { name: name.to_string() }),
        }
    }

    /// Looks a host function up through the registries in the chain,
    /// innermost first.
    #[must_use]
    pub fn host_function(&self, name: &str) -> Option<Rc<HostFunction>> {
        let frame = self.0.borrow();
        frame.registry
             .as_ref()
             .and_then(|registry| registry.get(name))
             .or_else(|| frame.outer.as_ref().and_then(|outer| outer.host_function(name)))
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        let mut names: Vec<&String> = frame.bindings.keys().collect();
        names.sort_unstable();
        f.debug_struct("Environment")
         .field("bindings", &names)
         .field("has_registry", &frame.registry.is_some())
         .field("has_outer", &frame.outer.is_some())
         .finish()
    }
}
