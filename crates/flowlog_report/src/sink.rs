//! Report persistence seam.

use flowlog_error::{FlowlogResult, ReportError, ReportErrorKind};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Destination for rendered report files.
///
/// The pipeline only ever hands a sink `(name, bytes)` pairs, so local
/// persistence stays swappable for any other blob store.
pub trait ReportSink {
    /// Stores `bytes` under `name` and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` when the write fails.
    fn put(&self, name: &str, bytes: &[u8]) -> FlowlogResult<PathBuf>;
}

/// Filesystem-backed sink writing into one output directory.
///
/// Writes are atomic: content goes to a temp file first, then a rename
/// publishes it.
#[derive(Debug, Clone)]
pub struct FilesystemSink {
    base_path: PathBuf,
}

impl FilesystemSink {
    /// Creates a sink rooted at `base_path`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` when the directory cannot be created.
    #[instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> FlowlogResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| {
            ReportError::new(ReportErrorKind::Io(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;
        Ok(Self { base_path })
    }

    /// Directory this sink writes into.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ReportSink for FilesystemSink {
    fn put(&self, name: &str, bytes: &[u8]) -> FlowlogResult<PathBuf> {
        let path = self.base_path.join(name);
        let tmp = self.base_path.join(format!("{}.tmp", name));

        fs::write(&tmp, bytes)
            .map_err(|e| ReportError::new(ReportErrorKind::Io(format!("{}: {}", tmp.display(), e))))?;
        fs::rename(&tmp, &path).map_err(|e| {
            ReportError::new(ReportErrorKind::Io(format!("{}: {}", path.display(), e)))
        })?;

        info!(path = %path.display(), size = bytes.len(), "wrote report file");
        Ok(path)
    }
}
