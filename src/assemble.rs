//! Building output artifacts for extract, remove and split-all.

use crate::archive::{SplitStaging, SPLIT_ARCHIVE_NAME};
use crate::config::{OperationConfig, OutputNaming};
use crate::error::{Error, Operation, Result};
use crate::page_range::PageSet;
use crate::pdf::PdfDocument;
use crate::progress::{Progress, ProgressReporter};
use crate::selection::{select_each_page, select_for_extract, select_for_remove, PageIndices};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Pdf,
    Zip,
}

#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub kind: ArtifactKind,
    /// Pages in the PDF, or entries in the archive.
    pub pages: usize,
}

pub fn extract(
    source: &PdfDocument,
    ranges: &str,
    config: &OperationConfig,
) -> Result<OutputArtifact> {
    let total = source.page_count();
    let selected = PageSet::parse(ranges, total, config.parse_policy)?;
    let indices = select_for_extract(&selected, config.empty_selection)?;

    tracing::info!(pages = indices.len(), total, "extracting pages");
    let bytes = source.build_from_indices(&indices, Operation::Extract)?;

    let file_name = match config.naming {
        OutputNaming::Range => {
            let (first, last) = bounds(&indices);
            format!("extracted_{}-{}.pdf", first, last)
        }
        OutputNaming::Source if indices.len() == total as usize => {
            format!("{}-all-pages.pdf", source.stem())
        }
        OutputNaming::Source => format!("{}-extracted-pages.pdf", source.stem()),
    };

    Ok(OutputArtifact {
        file_name,
        bytes,
        kind: ArtifactKind::Pdf,
        pages: indices.len(),
    })
}

pub fn remove(
    source: &PdfDocument,
    ranges: &str,
    config: &OperationConfig,
) -> Result<OutputArtifact> {
    let total = source.page_count();
    let excluded = PageSet::parse(ranges, total, config.parse_policy)?;
    let keep = select_for_remove(&excluded, total)?;

    tracing::info!(removed = excluded.len(), kept = keep.len(), "removing pages");
    let bytes = source.build_from_indices(&keep, Operation::Remove)?;

    let file_name = match config.naming {
        OutputNaming::Range => format!("kept_{}_pages.pdf", keep.len()),
        OutputNaming::Source => format!("{}-kept-pages.pdf", source.stem()),
    };

    Ok(OutputArtifact {
        file_name,
        bytes,
        kind: ArtifactKind::Pdf,
        pages: keep.len(),
    })
}

/// One single-page PDF per source page, built strictly in ascending order and
/// bundled into a ZIP once every page has succeeded.
pub fn split_all<R: ProgressReporter>(
    source: &PdfDocument,
    reporter: &mut R,
) -> Result<OutputArtifact> {
    let total = source.page_count();
    let mut staging = SplitStaging::with_capacity(total as usize);

    tracing::info!(total, "splitting every page");
    for (page, indices) in (1..=total).zip(select_each_page(total)) {
        let bytes = source
            .build_from_indices(&indices, Operation::SplitAll)
            .map_err(|e| with_page(e, page))?;
        staging.push(page, bytes);
        reporter.report(Progress {
            completed: page,
            total,
        });
    }

    tracing::debug!(
        entries = staging.len(),
        staged_bytes = staging.staged_bytes(),
        "writing archive"
    );
    let pages = staging.len();
    let bytes = staging.finalize()?;

    Ok(OutputArtifact {
        file_name: SPLIT_ARCHIVE_NAME.to_string(),
        bytes,
        kind: ArtifactKind::Zip,
        pages,
    })
}

fn bounds(indices: &PageIndices) -> (u32, u32) {
    let mut pages = indices.page_numbers();
    let first = pages.next().unwrap_or(0);
    let last = pages.last().unwrap_or(first);
    (first, last)
}

fn with_page(err: Error, page: u32) -> Error {
    match err {
        Error::Assembly { operation, reason } => Error::Assembly {
            operation,
            reason: format!("page {}: {}", page, reason),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmptySelection;
    use crate::pdf::test_support::{page_labels_of, sample_pdf, sample_pdf_with_broken_page};
    use crate::selection::EmptySelectionPolicy;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn load(pages: u32) -> PdfDocument {
        PdfDocument::load("report.pdf", &sample_pdf(pages)).unwrap()
    }

    #[test]
    fn test_extract_names_by_range() {
        let artifact = extract(&load(10), "7, 3-4", &OperationConfig::default()).unwrap();
        assert_eq!(artifact.file_name, "extracted_3-7.pdf");
        assert_eq!(artifact.pages, 3);
        assert_eq!(
            page_labels_of(&artifact.bytes),
            vec!["Page 3", "Page 4", "Page 7"]
        );
    }

    #[test]
    fn test_extract_blank_rejected_by_default() {
        let err = extract(&load(3), "  ", &OperationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptySelection(EmptySelection::NothingSelected)
        ));
    }

    #[test]
    fn test_extract_blank_selects_all_with_source_naming() {
        let config = OperationConfig {
            empty_selection: EmptySelectionPolicy::SelectAll,
            naming: OutputNaming::Source,
            ..OperationConfig::default()
        };
        let all = extract(&load(3), "", &config).unwrap();
        assert_eq!(all.file_name, "report-all-pages.pdf");
        assert_eq!(all.pages, 3);

        let some = extract(&load(3), "2", &config).unwrap();
        assert_eq!(some.file_name, "report-extracted-pages.pdf");
    }

    #[test]
    fn test_remove_names_by_kept_count() {
        let artifact = remove(&load(6), "2-3", &OperationConfig::default()).unwrap();
        assert_eq!(artifact.file_name, "kept_4_pages.pdf");
        assert_eq!(
            page_labels_of(&artifact.bytes),
            vec!["Page 1", "Page 4", "Page 5", "Page 6"]
        );
    }

    #[test]
    fn test_remove_every_page_rejected() {
        let err = remove(&load(4), "1-4", &OperationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptySelection(EmptySelection::AllPagesRemoved)
        ));
    }

    #[test]
    fn test_split_all_entries_and_progress() {
        let mut seen = Vec::new();
        let artifact = split_all(&load(4), &mut |p: Progress| seen.push(p.percent())).unwrap();

        assert_eq!(artifact.file_name, "split_pages.zip");
        assert_eq!(artifact.kind, ArtifactKind::Zip);
        assert_eq!(seen, vec![25, 50, 75, 100]);

        let mut archive = ZipArchive::new(Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(archive.len(), 4);
        for i in 0..4 {
            let mut entry = archive.by_index(i).unwrap();
            assert_eq!(entry.name(), format!("page_{:03}.pdf", i + 1));

            let mut pdf = Vec::new();
            entry.read_to_end(&mut pdf).unwrap();
            assert_eq!(page_labels_of(&pdf), vec![format!("Page {}", i + 1)]);
        }
    }

    #[test]
    fn test_split_all_single_page() {
        let mut seen = Vec::new();
        let artifact = split_all(&load(1), &mut |p: Progress| seen.push(p.percent())).unwrap();
        assert_eq!(artifact.pages, 1);
        assert_eq!(seen, vec![100]);
    }

    #[test]
    fn test_split_all_stops_at_failing_page() {
        let source = PdfDocument::load("broken.pdf", &sample_pdf_with_broken_page(5, 3)).unwrap();
        let mut seen = Vec::new();
        let err = split_all(&source, &mut |p: Progress| seen.push(p.completed)).unwrap_err();
        assert_eq!(err.user_message(), "Split failed. Try with a smaller file.");

        match err {
            Error::Assembly { operation, reason } => {
                assert_eq!(operation, Operation::SplitAll);
                assert!(reason.starts_with("page 3: "), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(seen, vec![1, 2]);
    }
}
