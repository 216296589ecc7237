use dshield_core::{DshieldError, ExportDocument, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes the export document as indented JSON
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `document` and replace the target file with it.
    ///
    /// The document is rendered in memory, written to a temporary file next
    /// to the target and renamed over it, so readers see either the previous
    /// export or the complete new one.
    pub fn write(&self, document: &ExportDocument) -> Result<()> {
        let mut json = document.to_json_pretty()?;
        json.push('\n');

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| DshieldError::Io(e.error))?;

        info!(
            path = %self.path.display(),
            labels = document.labels.len(),
            objects = document.objects.len(),
            "export written"
        );
        Ok(())
    }
}
