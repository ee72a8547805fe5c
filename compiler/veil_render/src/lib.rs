//! Veil renderer.
//!
//! Turns [`Artifacts`](veil_ir::Artifacts) into Rust source. Generation
//! never depends on this crate; a different target only needs another
//! renderer over the same artifacts.
//!
//! # Architecture
//!
//! ```text
//! Artifacts
//!    ↓
//! rust::render   (SourceWriter per file)
//!    ↓
//! Vec<RenderedUnit>  →  MemorySink / filesystem sink
//! ```

pub mod rust;
mod sink;
mod writer;

pub use rust::render;
pub use sink::MemorySink;
pub use writer::SourceWriter;

/// One generated source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedUnit {
    /// File name relative to the output directory.
    pub path: String,
    pub source: String,
}
