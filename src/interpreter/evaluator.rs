/// Core evaluation logic and context management.
///
/// Contains the runtime context, the program loop that prints top-level
/// results, and the dispatch over node kinds including the reserved forms.
pub mod core;

/// Lexical environments.
///
/// Scopes chained from the innermost outwards, the global one carrying the
/// host function registry.
pub mod environment;

/// Function call evaluation.
///
/// Resolves a call name against the host registry and then against closures
/// bound in scope, and invokes closures in a fresh child scope.
pub mod function;

/// Host call binding.
///
/// Checks arity and argument kinds against a host function's signature,
/// invokes it and validates what comes back.
pub mod binding;
