//! Reference data snapshot
//!
//! The classification rules consult two NYPL-core mappings (catalog item
//! type and Sierra location, each keyed by code) and a curated list of
//! "mixed" bibs. All three are loaded once at startup into an immutable
//! [`ReferenceData`] value that is passed by reference into every
//! decision; nothing here is cached lazily or mutated after construction.

use std::collections::{HashMap, HashSet};

/// Collection-type classification of one mapping code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingEntry {
    pub collection_types: Vec<String>,
}

impl MappingEntry {
    pub fn new<I, S>(collection_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection_types: collection_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable, process-wide reference data
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Catalog item type code -> collection types
    pub by_catalog_item_type: HashMap<String, MappingEntry>,
    /// Sierra location code -> collection types
    pub by_location: HashMap<String, MappingEntry>,
    /// Bib numbers (digits only) whose items have inconsistent collection
    /// types; their first item is not representative, so they are always
    /// treated as eligible
    pub mixed_bibs: HashSet<String>,
}

impl ReferenceData {
    pub fn new(
        by_catalog_item_type: HashMap<String, MappingEntry>,
        by_location: HashMap<String, MappingEntry>,
        mixed_bibs: HashSet<String>,
    ) -> Self {
        Self {
            by_catalog_item_type,
            by_location,
            mixed_bibs,
        }
    }

    pub fn is_mixed_bib(&self, bib_id: &str) -> bool {
        self.mixed_bibs.contains(bib_id)
    }
}
