//! The one loaded document, and the boundary every operation runs through.

use crate::assemble::{self, OutputArtifact};
use crate::config::OperationConfig;
use crate::error::{Error, Result};
use crate::pdf::PdfDocument;
use crate::progress::ProgressReporter;
use crate::status::Status;
use std::cell::Cell;

#[derive(Default)]
pub struct Session {
    source: Option<PdfDocument>,
    busy: Cell<bool>,
}

impl Session {
    /// Decode `bytes` into a session owning the new document. A failed load
    /// yields no session at all.
    pub fn open(name: &str, bytes: &[u8], config: &OperationConfig) -> Result<Self> {
        if config.exceeds_size_advisory(bytes.len()) {
            tracing::warn!(
                file = name,
                size_bytes = bytes.len(),
                threshold = config.size_advisory_bytes,
                "large input"
            );
            Status::Advisory.show();
        }

        Status::Reading.show();
        let source = PdfDocument::load(name, bytes)?;
        tracing::info!(
            file = name,
            pages = source.page_count(),
            size_bytes = bytes.len(),
            "loaded PDF"
        );
        Status::Ready {
            pages: source.page_count(),
        }
        .show();

        Ok(Session {
            source: Some(source),
            busy: Cell::new(false),
        })
    }

    /// Drop the loaded document.
    #[cfg(test)]
    pub fn reset(self) -> Self {
        Session::default()
    }

    pub fn source(&self) -> Result<&PdfDocument> {
        self.source.as_ref().ok_or(Error::NoDocument)
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Mark the session busy until the returned guard is dropped.
    pub fn begin(&self) -> Result<OperationGuard<'_>> {
        if self.busy.replace(true) {
            return Err(Error::Busy);
        }
        Ok(OperationGuard { busy: &self.busy })
    }

    pub fn extract(&self, ranges: &str, config: &OperationConfig) -> Result<OutputArtifact> {
        let _guard = self.begin()?;
        let source = self.source()?;
        Status::Extracting.show();
        assemble::extract(source, ranges, config)
    }

    pub fn remove(&self, ranges: &str, config: &OperationConfig) -> Result<OutputArtifact> {
        let _guard = self.begin()?;
        let source = self.source()?;
        Status::Removing.show();
        assemble::remove(source, ranges, config)
    }

    pub fn split_all<R: ProgressReporter>(&self, reporter: &mut R) -> Result<OutputArtifact> {
        let _guard = self.begin()?;
        let source = self.source()?;
        Status::Splitting(0).show();
        assemble::split_all(source, reporter)
    }
}

/// Clears the session's busy flag on drop, whether the operation succeeded,
/// failed or panicked.
pub struct OperationGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

/// Run `f`, logging any failure and turning it into the status line shown
/// to the user.
pub fn run_operation<T>(
    label: &'static str,
    f: impl FnOnce() -> Result<T>,
) -> std::result::Result<T, Status> {
    f().map_err(|e| {
        tracing::error!(operation = label, error = %e, "operation failed");
        Status::Failed(e.user_message())
    })
}
