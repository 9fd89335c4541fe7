use std::fmt;

/// The user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Reading,
    Advisory,
    Ready { pages: u32 },
    Extracting,
    Removing,
    Splitting(u8),
    Done(String),
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Reading => f.write_str("Reading PDF…"),
            Status::Advisory => f.write_str(
                "This file is quite large. If processing stalls, try splitting it in chunks.",
            ),
            Status::Ready { pages } => write!(f, "Ready. {} page(s).", pages),
            Status::Extracting => f.write_str("Extracting pages…"),
            Status::Removing => f.write_str("Removing pages…"),
            Status::Splitting(pct) => write!(f, "Splitting pages… {}%", pct),
            Status::Done(detail) => write!(f, "Done. {}", detail),
            Status::Failed(message) => f.write_str(message),
        }
    }
}

impl Status {
    /// Print to stderr; stdout carries command output and the MCP transport.
    pub fn show(&self) {
        eprintln!("{}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitting_shows_percent() {
        assert_eq!(Status::Splitting(42).to_string(), "Splitting pages… 42%");
    }

    #[test]
    fn test_done_prefix() {
        assert_eq!(
            Status::Done("Kept 3 pages.".into()).to_string(),
            "Done. Kept 3 pages."
        );
    }
}
