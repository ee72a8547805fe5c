//! Veil IR - data model for the masking generator.
//!
//! This crate holds every value shared between generation, rendering and the
//! runtime:
//!
//! - **Identities**: [`TypeName`], [`RuleName`], [`PrimitiveKind`]
//! - **Inputs**: [`TypeDescriptor`], [`FieldDescriptor`], [`Rule`], [`Config`]
//! - **Classification**: [`Category`]
//! - **Outputs**: [`Artifacts`] and its parts ([`Handler`], [`Insertion`],
//!   [`Initializer`], [`DispatchEntry`])
//!
//! Inputs are immutable for a generation run. Outputs are plain values with
//! no reference to the inputs they were built from.

pub mod artifact;
mod category;
pub mod config;
mod descriptor;
mod name;
mod primitive;
mod rule;

pub use artifact::{
    Artifacts, CustomPlan, DispatchEntry, FieldAction, FieldPlan, Guard, Handler, HandlerId,
    HandlerKind, Initializer, Insertion, MaskPlan, OperationFragment, Procedure, RuleRegistry,
};
pub use category::Category;
pub use config::{Config, ConfigError, ConfigFile};
pub use descriptor::{
    CompareOp, Condition, FieldDescriptor, FieldTraits, Literal, MaskDirective, TypeDescriptor,
    TypeFlags,
};
pub use name::{RuleName, TypeName, PATH_SEPARATOR};
pub use primitive::{PrimitiveKind, STRING_TYPE};
pub use rule::{Fallback, Rule};
