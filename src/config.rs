use crate::page_range::ParsePolicy;
use crate::selection::EmptySelectionPolicy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIZE_ADVISORY_MB: u64 = 250;

/// How output files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputNaming {
    /// `extracted_3-7.pdf`, `kept_12_pages.pdf`
    #[default]
    Range,
    /// `report-extracted-pages.pdf`, `report-kept-pages.pdf`
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationConfig {
    pub parse_policy: ParsePolicy,
    pub empty_selection: EmptySelectionPolicy,
    pub naming: OutputNaming,
    pub size_advisory_bytes: u64,
}

impl Default for OperationConfig {
    fn default() -> Self {
        OperationConfig {
            parse_policy: ParsePolicy::default(),
            empty_selection: EmptySelectionPolicy::default(),
            naming: OutputNaming::default(),
            size_advisory_bytes: DEFAULT_SIZE_ADVISORY_MB * 1024 * 1024,
        }
    }
}

impl OperationConfig {
    pub fn with_size_advisory_mb(mut self, mb: u64) -> Self {
        self.size_advisory_bytes = mb.saturating_mul(1024 * 1024);
        self
    }

    pub fn exceeds_size_advisory(&self, size_bytes: usize) -> bool {
        size_bytes as u64 > self.size_advisory_bytes
    }
}
