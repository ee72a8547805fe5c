//! Filesystem emission.

use std::fs;
use std::path::{Path, PathBuf};

use veil_gen::EmissionSink;
use veil_ir::Artifacts;

use crate::EmitError;

/// File name of the artifact dump written next to the sources.
pub const ARTIFACTS_FILE: &str = "artifacts.json";

/// Writes rendered Rust sources, and optionally the raw artifacts, into a
/// directory.
#[derive(Debug)]
pub struct FsSink {
    out_dir: PathBuf,
    emit_json: bool,
    written: Vec<PathBuf>,
}

impl FsSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            emit_json: false,
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_artifacts_json(mut self, enabled: bool) -> Self {
        self.emit_json = enabled;
        self
    }

    /// Files written by the last emission, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, name: &str, contents: &str) -> Result<(), EmitError> {
        let path = self.out_dir.join(name);
        fs::write(&path, contents).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote");
        self.written.push(path);
        Ok(())
    }
}

impl EmissionSink for FsSink {
    type Error = EmitError;

    fn emit(&mut self, artifacts: &Artifacts) -> Result<(), EmitError> {
        create_dir(&self.out_dir)?;
        self.written.clear();
        for unit in veil_render::render(artifacts) {
            self.write(&unit.path, &unit.source)?;
        }
        if self.emit_json {
            let json = serde_json::to_string_pretty(artifacts)?;
            self.write(ARTIFACTS_FILE, &json)?;
        }
        tracing::info!(
            dir = %self.out_dir.display(),
            files = self.written.len(),
            "emitted"
        );
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<(), EmitError> {
    fs::create_dir_all(dir).map_err(|source| EmitError::Io {
        path: dir.to_owned(),
        source,
    })
}
