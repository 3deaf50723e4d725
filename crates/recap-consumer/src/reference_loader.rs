//! One-time reference data assembly
//!
//! Builds the immutable [`ReferenceData`] snapshot the decision engine
//! reads for the rest of the process: the two NYPL-core mappings over
//! HTTP and the curated mixed-bib list from disk.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use recap_client::MappingsClient;
use recap_core::{RecapError, ReferenceData, Result};

/// Parse the mixed-bib list: one bib number per line, optional leading
/// `b` stripped, surrounding whitespace trimmed, blank lines skipped.
pub fn parse_mixed_bibs(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix('b').unwrap_or(line).to_string())
        .collect()
}

pub fn load_mixed_bibs(path: &Path) -> Result<HashSet<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RecapError::Reference(format!("reading mixed-bib list {}: {e}", path.display()))
    })?;

    let bibs = parse_mixed_bibs(&contents);
    info!(count = bibs.len(), "loaded mixed bib ids");
    Ok(bibs)
}

pub async fn load_reference_data(
    mappings: &MappingsClient,
    mixed_bibs_path: &Path,
) -> Result<ReferenceData> {
    let by_catalog_item_type = mappings.by_catalog_item_type().await?;
    let by_location = mappings.by_location().await?;
    let mixed_bibs = load_mixed_bibs(mixed_bibs_path)?;

    Ok(ReferenceData::new(
        by_catalog_item_type,
        by_location,
        mixed_bibs,
    ))
}
