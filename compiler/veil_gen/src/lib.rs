//! Veil generator core.
//!
//! Turns a validated [`Config`](veil_ir::Config) and a set of discovered
//! type descriptors into [`Artifacts`](veil_ir::Artifacts):
//!
//! - [`classify`]: one category per (rule, type), first match wins
//! - [`field_ops`]: comparison shapes for conditional field masking
//! - [`handler`]: shared handlers per (rule, category), custom handlers per
//!   (rule, type)
//! - [`chunk`]: bounded, chained initializer procedures
//! - [`registry`]: handler ownership and type→handler bindings
//! - [`dispatch`]: per-rule entry points
//! - [`pipeline`]: orchestration; [`generate`] and [`run`]
//!
//! Discovery and emission are collaborators behind [`TypeDiscovery`] and
//! [`EmissionSink`]. Nothing in this crate performs I/O.

pub mod chunk;
pub mod classify;
pub mod discovery;
pub mod dispatch;
mod error;
pub mod field_ops;
pub mod handler;
pub mod pipeline;
pub mod registry;

pub use chunk::ChainedInitializer;
pub use classify::TypeClassifier;
pub use discovery::{DiscoveryError, StaticDiscovery, TypeDiscovery};
pub use error::{GenError, UnsupportedComparison};
pub use pipeline::{generate, run, EmissionSink, RunError};
pub use registry::{Binding, RegistryAssembler};
