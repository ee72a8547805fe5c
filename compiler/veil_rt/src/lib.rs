//! Veil runtime.
//!
//! Executes what generation fixed: handlers, per-rule bindings and dispatch
//! fallbacks. Generated code populates a [`RegistryBuilder`] from its
//! chained initializer; [`Registry::load`] does the same straight from
//! [`Artifacts`](veil_ir::Artifacts) with interpreted handlers.
//!
//! # Dispatch
//!
//! - `null` maps to `null` without lookup
//! - otherwise the value's exact type identity selects the handler
//! - a miss applies the rule's fallback, or fails with
//!   [`DispatchError::Unresolved`]

mod error;
pub mod handler;
mod registry;
mod value;

pub use error::{DispatchError, LoadError};
pub use handler::{BuiltinHandler, MaskHandler, PlanHandler};
pub use registry::{Dispatch, Registry, RegistryBuilder};
pub use value::{Object, Value};

// Identities generated code refers to.
pub use veil_ir::{Category, Fallback, HandlerId};
