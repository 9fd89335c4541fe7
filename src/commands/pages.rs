use crate::config::OperationConfig;
use crate::page_range::PageSet;
use crate::selection::{select_for_extract, select_for_remove};
use anyhow::Result;

/// Print the validated page set for `pages`, and the indices extract and
/// remove would copy.
pub fn run(pages: &str, total: u32, config: &OperationConfig) -> Result<()> {
    let set = PageSet::parse(pages, total, config.parse_policy)?;
    println!("Pages: {}", set);

    match select_for_extract(&set, config.empty_selection) {
        Ok(indices) => println!("Extract indices: {}", join(indices.as_slice())),
        Err(e) => println!("Extract: {}", e.user_message()),
    }
    match select_for_remove(&set, total) {
        Ok(indices) => println!("Remove keeps indices: {}", join(indices.as_slice())),
        Err(e) => println!("Remove: {}", e.user_message()),
    }

    Ok(())
}

fn join(indices: &[u32]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
