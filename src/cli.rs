use crate::config::{OperationConfig, OutputNaming, DEFAULT_SIZE_ADVISORY_MB};
use crate::page_range::ParsePolicy;
use crate::selection::EmptySelectionPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagecut")]
#[command(about = "Extract, remove and split PDF pages locally, with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Warn before processing inputs larger than this many MiB
    #[arg(long, global = true, env = "PAGECUT_SIZE_ADVISORY_MB", default_value_t = DEFAULT_SIZE_ADVISORY_MB)]
    pub size_advisory_mb: u64,

    /// Output file naming scheme
    #[arg(long, global = true, env = "PAGECUT_NAMING", value_enum, default_value_t = OutputNaming::Range)]
    pub naming: OutputNaming,

    /// Reject malformed or out-of-range page tokens instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn operation_config(&self, all_if_empty: bool) -> OperationConfig {
        OperationConfig {
            parse_policy: if self.strict {
                ParsePolicy::STRICT
            } else {
                ParsePolicy::LENIENT
            },
            empty_selection: if all_if_empty {
                EmptySelectionPolicy::SelectAll
            } else {
                EmptySelectionPolicy::Reject
            },
            naming: self.naming,
            ..OperationConfig::default()
        }
        .with_size_advisory_mb(self.size_advisory_mb)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display PDF metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Show how a page range resolves, without touching a PDF
    Pages {
        /// Page ranges (e.g., "1-3,5,8-8")
        pages: String,

        /// Page count of the document the ranges apply to
        #[arg(short, long)]
        total: u32,
    },

    /// Extract page ranges to a new PDF
    #[command(alias = "cat")]
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page ranges (e.g., "1-3,5,8-8")
        #[arg(default_value = "")]
        pages: String,

        /// Export every page when no range is given
        #[arg(long)]
        all_if_empty: bool,

        /// Output file (defaults to a generated name next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a copy of the PDF without the given pages
    #[command(alias = "delete")]
    Remove {
        /// PDF file to remove pages from
        path: PathBuf,

        /// Page ranges to drop (e.g., "2,4-6")
        pages: String,

        /// Output file (defaults to a generated name next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split every page into its own PDF, bundled into a ZIP archive
    #[command(alias = "burst")]
    SplitAll {
        /// PDF file to split
        path: PathBuf,

        /// Output archive (defaults to split_pages.zip next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_defaults() {
        let cli = Cli::try_parse_from(["pagecut", "extract", "in.pdf"]).unwrap();
        let Commands::Extract {
            pages,
            all_if_empty,
            output,
            ..
        } = cli.command
        else {
            panic!("expected extract");
        };
        assert_eq!(pages, "");
        assert!(!all_if_empty);
        assert!(output.is_none());
        assert_eq!(
            cli.global.operation_config(false).empty_selection,
            EmptySelectionPolicy::Reject
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pagecut", "remove", "in.pdf", "1", "--strict", "--naming", "source",
        ])
        .unwrap();
        let config = cli.global.operation_config(false);
        assert_eq!(config.parse_policy, ParsePolicy::STRICT);
        assert_eq!(config.naming, OutputNaming::Source);
    }

    #[test]
    fn test_size_advisory_flag() {
        let cli =
            Cli::try_parse_from(["pagecut", "--size-advisory-mb", "1", "split-all", "in.pdf"])
                .unwrap();
        assert_eq!(cli.global.operation_config(false).size_advisory_bytes, 1024 * 1024);
    }
}
