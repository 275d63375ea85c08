use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::{ArgCount, BindError},
    interpreter::value::{core::Value, kind::Kind},
};

/// What a host function returns: its single value, or the failure it reports.
pub type HostResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

type HostFn = dyn Fn(&[Value]) -> HostResult;

/// Names taken by the grammar. A host function can never be registered
/// under one of these.
pub const RESERVED_NAMES: &[&str] = &["define", "set", "if", "begin", "lambda"];

/// The declared shape of a host function.
///
/// Arguments are checked against `params` position by position, then any
/// extra arguments against `variadic`. `returns` must be `[]`, `[k]`,
/// `[Error]` or `[k, Error]`; other shapes can be registered but fail when
/// called.
///
/// # Example
/// ```
/// use water::interpreter::{host::Signature, value::Kind};
///
/// let signature = Signature::new([Kind::Str]).variadic(Kind::Any).returns([Kind::Str]);
/// assert_eq!(signature.param(0), Some(Kind::Str));
/// assert_eq!(signature.param(5), Some(Kind::Any));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Fixed parameter kinds.
    pub params:   Vec<Kind>,
    /// Element kind of the trailing variadic arguments, if any.
    pub variadic: Option<Kind>,
    /// Declared return kinds.
    pub returns:  Vec<Kind>,
}

impl Signature {
    /// A signature with the given fixed parameters, no variadic tail and no
    /// returns.
    pub fn new(params: impl Into<Vec<Kind>>) -> Self {
        Self { params: params.into(),
               ..Self::default() }
    }

    /// Adds a variadic tail of the given element kind.
    #[must_use]
    pub fn variadic(mut self, kind: Kind) -> Self {
        self.variadic = Some(kind);
        self
    }

    /// Sets the declared return kinds.
    #[must_use]
    pub fn returns(mut self, kinds: impl Into<Vec<Kind>>) -> Self {
        self.returns = kinds.into();
        self
    }

    /// The argument count this signature accepts.
    #[must_use]
    pub fn arity(&self) -> ArgCount {
        if self.variadic.is_some() {
            ArgCount::AtLeast(self.params.len())
        } else {
            ArgCount::Exactly(self.params.len())
        }
    }

    /// The declared kind of the argument at `index`, or `None` past the end
    /// of a non-variadic signature.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<Kind> {
        self.params.get(index).copied().or(self.variadic)
    }

    /// Checks an argument count against the signature.
    ///
    /// # Errors
    /// Returns `BindError::ArgumentCount` if there are too few arguments, or
    /// too many for a non-variadic signature.
    pub fn check_arity(&self, function: &str, found: usize) -> Result<(), BindError> {
        let fits = match self.arity() {
            ArgCount::Exactly(n) => found == n,
            ArgCount::AtLeast(n) => found >= n,
        };
        if fits {
            Ok(())
        } else {
            Err(BindError::ArgumentCount { function: function.to_string(),
                                           expected: self.arity(),
                                           found })
        }
    }

    /// Reads the return shape.
    ///
    /// # Returns
    /// The kind of the returned value (`None` when nothing is returned) and
    /// whether the function may fail.
    ///
    /// # Errors
    /// Returns `BindError::MultipleReturns` for any shape other than `[]`,
    /// `[k]`, `[Error]` or `[k, Error]`.
    pub fn return_shape(&self, function: &str) -> Result<(Option<Kind>, bool), BindError> {
        match self.returns.as_slice() {
            [] => Ok((None, false)),
            [Kind::Error] => Ok((None, true)),
            [kind] => Ok((Some(*kind), false)),
            [kind, Kind::Error] if *kind != Kind::Error => Ok((Some(*kind), true)),
            _ => Err(BindError::MultipleReturns { function: function.to_string() }),
        }
    }
}

/// A named host function: a signature plus the callable behind it.
pub struct HostFunction {
    name:      String,
    signature: Signature,
    func:      Box<HostFn>,
}

impl HostFunction {
    /// Wraps a callable.
    pub fn new<F>(name: impl Into<String>, signature: Signature, func: F) -> Self
        where F: Fn(&[Value]) -> HostResult + 'static
    {
        Self { name: name.into(),
               signature,
               func: Box::new(func) }
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared signature.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the function with already checked arguments.
    ///
    /// # Errors
    /// Returns whatever failure the function reports.
    pub fn invoke(&self, args: &[Value]) -> HostResult {
        (self.func)(args)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunction")
         .field("name", &self.name)
         .field("signature", &self.signature)
         .finish_non_exhaustive()
    }
}

/// Host functions by name.
///
/// Attached to the global environment and shared by every scope below it.
///
/// # Example
/// ```
/// use water::interpreter::{
///     host::{Registry, Signature},
///     value::{Kind, Value},
/// };
///
/// let mut registry = Registry::default();
/// registry.register("double", Signature::new([Kind::Int]).returns([Kind::Int]), |args| {
///             Ok(Value::Int(args[0].as_int().unwrap_or_default() * 2))
///         })
///         .unwrap();
///
/// assert!(registry.contains("double"));
/// assert!(registry.register("lambda", Signature::default(), |_| Ok(Value::Unit)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    functions: HashMap<String, Rc<HostFunction>>,
}

impl Registry {
    /// Registers a host function, replacing any previous one with the same
    /// name.
    ///
    /// # Errors
    /// Returns `BindError::ReservedName` for `define`, `set`, `if`, `begin`
    /// and `lambda`.
    pub fn register<F>(&mut self,
                       name: impl Into<String>,
                       signature: Signature,
                       func: F)
                       -> Result<&mut Self, BindError>
        where F: Fn(&[Value]) -> HostResult + 'static
    {
        let name = name.into();
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(BindError::ReservedName { name });
        }
        self.insert(HostFunction::new(name, signature, func));

        Ok(self)
    }

    /// Adds a function without the reserved-name check.
    pub(crate) fn insert(&mut self, function: HostFunction) {
        self.functions.insert(function.name.clone(), Rc::new(function));
    }

    /// Looks a function up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<HostFunction>> {
        self.functions.get(name).cloned()
    }

    /// Returns `true` if a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
