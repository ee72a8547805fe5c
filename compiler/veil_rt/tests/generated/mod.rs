// Generated by veil. Do not edit.
// Namespace: acme::masks

pub mod dispatch;
pub mod handlers;
pub mod registry;

pub use dispatch::{apply_public, apply_audit};
pub use registry::{init_registry, Handlers};
