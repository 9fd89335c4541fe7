pub mod extract;
pub mod info;
pub mod pages;
pub mod remove;
pub mod split;

use crate::assemble::OutputArtifact;
use crate::config::OperationConfig;
use crate::session::{run_operation, Session};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Read `input` and open a session on it.
pub fn open_session(input: &Path, config: &OperationConfig) -> Result<Session> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.pdf");

    run_operation("load", || Session::open(name, &bytes, config))
        .map_err(|status| anyhow::anyhow!("{}", status))
}

/// Write `artifact` to `output`, or next to `input` under its generated name.
pub fn write_artifact(
    artifact: &OutputArtifact,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&artifact.file_name),
    };

    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        size_bytes = artifact.bytes.len(),
        "wrote output"
    );
    Ok(path)
}
