use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    EmptySelection(#[from] EmptySelection),

    #[error("{operation} failed: {reason}")]
    Assembly {
        operation: Operation,
        reason: String,
    },

    #[error("Invalid page range token: {0:?}")]
    InvalidToken(String),

    #[error("Page {page} is out of range (1-{total})")]
    PageOutOfRange { page: u64, total: u32 },

    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Another operation is already running")]
    Busy,

    #[error("No document is loaded")]
    NoDocument,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to parse PDF {name}: {reason}")]
    Malformed { name: String, reason: String },

    #[error("PDF {name} is encrypted")]
    Encrypted { name: String },

    #[error("PDF {name} has no pages")]
    NoPages { name: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySelection {
    #[error("No pages selected")]
    NothingSelected,

    #[error("No pages selected for removal")]
    NothingToRemove,

    #[error("Removing every page would produce an empty document")]
    AllPagesRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Extract,
    Remove,
    SplitAll,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Extract => "Extraction",
            Operation::Remove => "Remove",
            Operation::SplitAll => "Split",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn assembly(operation: Operation, reason: impl std::fmt::Display) -> Self {
        Error::Assembly {
            operation,
            reason: reason.to_string(),
        }
    }

    /// The single line shown to the user when an operation fails.
    pub fn user_message(&self) -> String {
        match self {
            Error::Load(LoadError::Encrypted { .. }) => {
                "This PDF appears to be password-protected. Please unlock it first.".to_string()
            }
            Error::Load(LoadError::NoPages { .. }) => "This PDF has no pages.".to_string(),
            Error::Load(_) => {
                "Sorry, that PDF could not be read. It may be corrupted or password-protected."
                    .to_string()
            }
            Error::EmptySelection(EmptySelection::NothingSelected) => {
                "Please enter a valid page range.".to_string()
            }
            Error::EmptySelection(EmptySelection::NothingToRemove) => {
                "Please enter pages to remove.".to_string()
            }
            Error::EmptySelection(EmptySelection::AllPagesRemoved) => {
                "You removed all pages; nothing would be left.".to_string()
            }
            Error::Assembly { operation, .. } => match operation {
                Operation::Extract => {
                    "Extraction failed. The PDF might be encrypted or corrupted.".to_string()
                }
                Operation::Remove => {
                    "Remove failed. The PDF might be encrypted or too large.".to_string()
                }
                Operation::SplitAll => "Split failed. Try with a smaller file.".to_string(),
            },
            Error::Archive(_) => "Split failed. Try with a smaller file.".to_string(),
            Error::InvalidToken(token) => format!("Invalid page range: {}", token),
            Error::PageOutOfRange { page, total } => {
                format!("Page {} is out of range (1-{}).", page, total)
            }
            Error::Io { path, .. } => format!("Could not access {}.", path.display()),
            Error::Busy => "Please wait for the current operation to finish.".to_string(),
            Error::NoDocument => "Please choose a PDF file first.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypted_message_mentions_password() {
        let err: Error = LoadError::Encrypted {
            name: "a.pdf".into(),
        }
        .into();
        assert!(err.user_message().contains("password-protected"));
    }

    #[test]
    fn test_malformed_message_mentions_password() {
        let err: Error = LoadError::Malformed {
            name: "a.pdf".into(),
            reason: "invalid file header".into(),
        }
        .into();
        assert_eq!(
            err.user_message(),
            "Sorry, that PDF could not be read. It may be corrupted or password-protected."
        );
    }

    #[test]
    fn test_empty_selection_is_distinct_from_assembly() {
        let err: Error = EmptySelection::AllPagesRemoved.into();
        assert!(matches!(
            err,
            Error::EmptySelection(EmptySelection::AllPagesRemoved)
        ));
        assert!(err.user_message().contains("removed all pages"));
    }

    #[test]
    fn test_assembly_display_names_operation() {
        let err = Error::assembly(Operation::SplitAll, "bad page object");
        assert_eq!(err.to_string(), "Split failed: bad page object");
    }
}
