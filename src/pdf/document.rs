use crate::error::{Error, LoadError, Operation, Result};
use crate::selection::PageIndices;
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use std::path::Path;

/// A decoded source PDF, owned by a session.
pub struct PdfDocument {
    pub doc: Document,
    pub name: String,
    pub size_bytes: usize,
}

impl PdfDocument {
    /// Decode `bytes`. Whether a file is a PDF is decided by decoding it,
    /// not by its name or declared type.
    pub fn load(name: &str, bytes: &[u8]) -> std::result::Result<Self, LoadError> {
        let doc = match Document::load_mem(bytes) {
            Ok(doc) => doc,
            Err(e) if looks_encrypted(bytes) => {
                tracing::debug!(error = %e, "load failed on an encrypted PDF");
                return Err(LoadError::Encrypted { name: name.into() });
            }
            Err(e) => {
                return Err(LoadError::Malformed {
                    name: name.into(),
                    reason: e.to_string(),
                })
            }
        };

        if doc.is_encrypted() {
            return Err(LoadError::Encrypted { name: name.into() });
        }
        if doc.get_pages().is_empty() {
            return Err(LoadError::NoPages { name: name.into() });
        }

        Ok(PdfDocument {
            doc,
            name: name.to_string(),
            size_bytes: bytes.len(),
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf");
        Ok(Self::load(name, &bytes)?)
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// File name without a trailing `.pdf`, for naming outputs.
    pub fn stem(&self) -> &str {
        let name = self.name.as_str();
        match name.len().checked_sub(4) {
            Some(cut)
                if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") =>
            {
                &name[..cut]
            }
            _ => name,
        }
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = get_string_from_dict(dict, b"Title");
                info.author = get_string_from_dict(dict, b"Author");
                info.creator = get_string_from_dict(dict, b"Creator");
                info.producer = get_string_from_dict(dict, b"Producer");
                info.subject = get_string_from_dict(dict, b"Subject");
            }
        }

        info.page_count = self.page_count();
        info.version = self.doc.version.clone();
        info.size_bytes = self.size_bytes;
        info
    }

    /// Copy the pages at `indices` (zero-based, ascending) into a new
    /// document and serialize it.
    pub fn build_from_indices(
        &self,
        indices: &PageIndices,
        operation: Operation,
    ) -> Result<Vec<u8>> {
        let total = self.page_count();
        if indices.is_empty() {
            return Err(Error::assembly(operation, "no pages to copy"));
        }
        if let Some(&bad) = indices.as_slice().iter().find(|&&i| i >= total) {
            return Err(Error::assembly(
                operation,
                format!("page index {} is out of range (0-{})", bad, total - 1),
            ));
        }

        let keep: Vec<u32> = indices.page_numbers().collect();
        let pages_to_delete: Vec<u32> = (1..=total)
            .filter(|p| keep.binary_search(p).is_err())
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        let copied = new_doc.get_pages().len();
        if copied != indices.len() {
            return Err(Error::assembly(
                operation,
                format!("expected {} page(s), copied {}", indices.len(), copied),
            ));
        }

        for (number, page_id) in new_doc.get_pages() {
            if let Some(missing) = missing_content(&new_doc, page_id) {
                return Err(Error::assembly(
                    operation,
                    format!(
                        "output page {} refers to missing content object {} {} R",
                        number, missing.0, missing.1
                    ),
                ));
            }
        }

        new_doc.prune_objects();

        let mut buffer = Vec::new();
        new_doc
            .save_to(&mut buffer)
            .map_err(|e| Error::assembly(operation, format!("save failed: {}", e)))?;
        Ok(buffer)
    }
}

/// First `Contents` reference of a page that does not resolve.
fn missing_content(doc: &Document, page_id: ObjectId) -> Option<ObjectId> {
    let page = doc.get_dictionary(page_id).ok()?;
    let refs: Vec<ObjectId> = match page.get(b"Contents").ok()? {
        Object::Reference(id) => vec![*id],
        Object::Array(items) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
        _ => Vec::new(),
    };
    refs.into_iter().find(|id| doc.get_object(*id).is_err())
}

// The `/Encrypt` key lives in the trailer dictionary, or in the
// cross-reference stream dictionary that `startxref` points to.
const TRAILER_WINDOW: usize = 4096;

/// Whether an undecodable file still carries an encryption dictionary.
/// Only the trailer region is searched, so a stray `/Encrypt` inside page
/// content does not count.
fn looks_encrypted(bytes: &[u8]) -> bool {
    let tail = &bytes[bytes.len().saturating_sub(TRAILER_WINDOW)..];
    if has_encrypt_key(tail) {
        return true;
    }
    xref_offset(tail)
        .and_then(|offset| bytes.get(offset..))
        .is_some_and(|xref| has_encrypt_key(&xref[..xref.len().min(TRAILER_WINDOW)]))
}

fn has_encrypt_key(region: &[u8]) -> bool {
    region.windows(8).any(|w| w == b"/Encrypt")
}

/// The byte offset after the last `startxref` keyword.
fn xref_offset(tail: &[u8]) -> Option<usize> {
    let at = tail.windows(9).rposition(|w| w == b"startxref")?;
    let digits: String = tail[at + 9..]
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PdfInfo {
    pub page_count: u32,
    pub version: String,
    pub size_bytes: usize,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub subject: Option<String>,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        // PDFDocEncoding, approximated as Latin-1
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
