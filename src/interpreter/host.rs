/// The host function registry.
///
/// Declares `Signature` (the parameter and return kinds a host function
/// accepts and produces), `HostFunction` and the `Registry` the global
/// environment consults before any closure.
pub mod registry;
/// The default primitive library.
///
/// Arithmetic, comparison, equality, negation and the formatted output
/// helpers, each registered with the signature the binding layer enforces.
pub mod builtin;

pub use self::registry::{HostFunction, HostResult, RESERVED_NAMES, Registry, Signature};
