//! Two-phase archive for split-all: stage every page in memory, then write
//! the ZIP only once all pages are present.

use crate::error::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const SPLIT_ARCHIVE_NAME: &str = "split_pages.zip";

/// Entry name for a 1-based page, zero-padded to at least three digits.
pub fn entry_name(page: u32) -> String {
    format!("page_{:03}.pdf", page)
}

#[derive(Debug, Default)]
pub struct SplitStaging {
    entries: Vec<(String, Vec<u8>)>,
}

impl SplitStaging {
    pub fn with_capacity(pages: usize) -> Self {
        SplitStaging {
            entries: Vec::with_capacity(pages),
        }
    }

    pub fn push(&mut self, page: u32, bytes: Vec<u8>) {
        self.entries.push((entry_name(page), bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn staged_bytes(&self) -> usize {
        self.entries.iter().map(|(_, b)| b.len()).sum()
    }

    /// Write all staged entries, in staging order, into a ZIP archive.
    pub fn finalize(self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.entries {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes).map_err(zip::result::ZipError::Io)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}
