use super::{open_session, write_artifact};
use crate::config::OperationConfig;
use crate::session::run_operation;
use crate::status::Status;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run(
    input: &Path,
    pages: &str,
    output: Option<&Path>,
    config: &OperationConfig,
) -> Result<PathBuf> {
    let session = open_session(input, config)?;

    let artifact = run_operation("remove", || session.remove(pages, config))
        .map_err(|status| anyhow::anyhow!("{}", status))?;
    let path = write_artifact(&artifact, input, output)?;

    Status::Done(format!("Kept {} pages.", artifact.pages)).show();
    println!("{}", path.display());

    Ok(path)
}
