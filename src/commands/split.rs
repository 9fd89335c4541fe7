use super::{open_session, write_artifact};
use crate::config::OperationConfig;
use crate::progress::StatusProgress;
use crate::session::run_operation;
use crate::status::Status;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run(input: &Path, output: Option<&Path>, config: &OperationConfig) -> Result<PathBuf> {
    let session = open_session(input, config)?;
    let total = session.source()?.page_count();
    eprintln!(
        "Splitting {} pages… This can take time for large files.",
        total
    );

    let mut progress = StatusProgress::new();
    let artifact = run_operation("split-all", || session.split_all(&mut progress))
        .map_err(|status| anyhow::anyhow!("{}", status))?;
    let path = write_artifact(&artifact, input, output)?;

    Status::Done(format!("Split {} pages into a ZIP.", artifact.pages)).show();
    println!("{}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{sample_pdf, sample_pdf_with_broken_page};
    use std::io::Cursor;
    use zip::ZipArchive;

    #[test]
    fn test_split_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.pdf");
        std::fs::write(&input, sample_pdf(3)).unwrap();

        let path = run(&input, None, &OperationConfig::default()).unwrap();
        assert_eq!(path, dir.path().join("split_pages.zip"));

        let archive = ZipArchive::new(Cursor::new(std::fs::read(&path).unwrap())).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"page_001.pdf"));
        assert!(names.contains(&"page_003.pdf"));
    }

    #[test]
    fn test_split_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.pdf");
        std::fs::write(&input, b"definitely not a pdf").unwrap();

        let err = run(&input, None, &OperationConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sorry, that PDF could not be read. It may be corrupted or password-protected."
        );
        assert!(!dir.path().join("split_pages.zip").exists());
    }

    #[test]
    fn test_split_failure_writes_no_archive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.pdf");
        std::fs::write(&input, sample_pdf_with_broken_page(4, 2)).unwrap();

        let err = run(&input, None, &OperationConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Split failed. Try with a smaller file.");
        assert!(!dir.path().join("split_pages.zip").exists());
    }
}
