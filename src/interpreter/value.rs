/// Runtime values.
///
/// Declares the `Value` enum produced by evaluation and consumed by host
/// functions, with its display form and accessors.
pub mod core;
/// Value kinds.
///
/// Defines `Kind`, the primitive kind of a value or of a declared host
/// function slot.
pub mod kind;
/// Closures.
///
/// A closure pairs a lambda's parameters and body with the environment it
/// was created in.
pub mod closure;

pub use self::{closure::Closure, core::Value, kind::Kind};
