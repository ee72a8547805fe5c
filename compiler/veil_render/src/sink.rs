use std::convert::Infallible;

use veil_gen::EmissionSink;
use veil_ir::Artifacts;

use crate::{rust, RenderedUnit};

/// Sink that keeps rendered units in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub units: Vec<RenderedUnit>,
    pub artifacts: Option<Artifacts>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered unit by file name.
    pub fn unit(&self, path: &str) -> Option<&RenderedUnit> {
        self.units.iter().find(|unit| unit.path == path)
    }
}

impl EmissionSink for MemorySink {
    type Error = Infallible;

    fn emit(&mut self, artifacts: &Artifacts) -> Result<(), Self::Error> {
        self.units = rust::render(artifacts);
        self.artifacts = Some(artifacts.clone());
        Ok(())
    }
}
