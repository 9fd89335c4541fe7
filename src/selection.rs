//! Mapping validated page sets to the zero-based page indices copied into an
//! output document.

use crate::error::{EmptySelection, Result};
use crate::page_range::PageSet;
use serde::{Deserialize, Serialize};

/// What extraction does with an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Fail and ask for a range.
    #[default]
    Reject,
    /// Treat a blank range as "every page".
    SelectAll,
}

/// Strictly ascending zero-based page indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageIndices(Vec<u32>);

impl PageIndices {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// 1-based page numbers for the same pages.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().map(|i| i + 1)
    }
}

pub fn select_for_extract(
    selected: &PageSet,
    policy: EmptySelectionPolicy,
) -> Result<PageIndices> {
    if selected.is_empty() {
        return match policy {
            EmptySelectionPolicy::Reject => Err(EmptySelection::NothingSelected.into()),
            EmptySelectionPolicy::SelectAll => {
                let all = PageSet::all(selected.total_pages());
                Ok(PageIndices(all.iter().map(|p| p - 1).collect()))
            }
        };
    }

    Ok(PageIndices(selected.iter().map(|p| p - 1).collect()))
}

pub fn select_for_remove(excluded: &PageSet, total_pages: u32) -> Result<PageIndices> {
    if excluded.is_empty() {
        return Err(EmptySelection::NothingToRemove.into());
    }

    let keep: Vec<u32> = (1..=total_pages)
        .filter(|p| !excluded.contains(*p))
        .map(|p| p - 1)
        .collect();

    if keep.is_empty() {
        return Err(EmptySelection::AllPagesRemoved.into());
    }

    Ok(PageIndices(keep))
}

/// One single-page selection per page, ascending, for split-all.
pub fn select_each_page(total_pages: u32) -> impl Iterator<Item = PageIndices> {
    (0..total_pages).map(|i| PageIndices(vec![i]))
}
