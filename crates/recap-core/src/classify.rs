//! Location and collection-type classification
//!
//! These predicates decide whether a record belongs in the ReCAP domain.
//! Item eligibility is purely structural plus a location-prefix check; bib
//! eligibility is derived from the bib's first item by convention, with
//! the mixed-bib override set as the conservative escape hatch for bibs
//! whose items disagree.

use tracing::debug;

use crate::error::{RecapError, Result};
use crate::models::{Bib, Item};
use crate::reference::ReferenceData;

/// Fixed-field label that carries an item's catalog item type
const ITEM_TYPE_LABEL: &str = "Item Type";

/// Collection type marking research material
const RESEARCH: &str = "Research";

/// Catalog item lookup collaborator.
///
/// Returns the single representative item for a bib, or `None` when the
/// lookup yields nothing usable — absence, not an error.
#[allow(async_fn_in_trait)]
pub trait CatalogItems {
    async fn first_item_for_bib(&self, bib_id: &str) -> Result<Option<Item>>;
}

/// True iff `code` names an off-site (ReCAP) Sierra location.
///
/// Exact, case-sensitive prefix match; no normalization.
pub fn is_offsite_location(code: &str) -> bool {
    code.starts_with("rc")
}

/// True iff the item's catalog item type maps to a Research collection.
///
/// The "Item Type" fixed field is found by label, not by position. An
/// item without a fixed-field table cannot be classified and is a hard
/// error; an item whose type has no mapping entry is simply not research.
pub fn is_research_by_item_type(item: &Item, reference: &ReferenceData) -> Result<bool> {
    let fixed_fields = item
        .fixed_fields
        .as_ref()
        .ok_or_else(|| RecapError::MalformedItem("no fixedFields".to_string()))?;

    let item_type = fixed_fields
        .values()
        .find(|field| field.label.as_deref() == Some(ITEM_TYPE_LABEL))
        .and_then(|field| field.value.as_deref());

    let mapped = item_type.and_then(|code| reference.by_catalog_item_type.get(code));
    let is_research = mapped
        .map(|entry| entry.collection_types.iter().any(|t| t == RESEARCH))
        .unwrap_or(false);

    debug!(?item_type, is_research, "classified item by catalog item type");
    Ok(is_research)
}

/// True iff the item's location holds *only* Research material.
///
/// Locations mapping to several collection types are shared shelving and
/// do not qualify on their own.
pub fn is_research_by_location(item: &Item, reference: &ReferenceData) -> bool {
    let mapped = item
        .location_code()
        .and_then(|code| reference.by_location.get(code));

    mapped
        .map(|entry| entry.collection_types == [RESEARCH])
        .unwrap_or(false)
}

/// Decide whether a bib belongs to the ReCAP domain.
///
/// Mixed bibs are always eligible: their first item may not represent its
/// siblings, so we must assume ReCAP holdings exist. Otherwise the bib's
/// first item decides — research by item type or by location. A missing
/// or unusable first item means "not eligible", never an error.
pub async fn is_bib_eligible<C: CatalogItems>(
    bib: &Bib,
    reference: &ReferenceData,
    catalog: &C,
) -> Result<bool> {
    if reference.is_mixed_bib(&bib.id) {
        debug!(bib_id = %bib.id, "bib is in the mixed-bib set");
        return Ok(true);
    }

    let Some(first_item) = catalog.first_item_for_bib(&bib.id).await? else {
        debug!(bib_id = %bib.id, "no usable first item; bib not eligible");
        return Ok(false);
    };

    Ok(is_research_by_item_type(&first_item, reference)?
        || is_research_by_location(&first_item, reference))
}

/// Decide whether an item belongs to the ReCAP domain.
///
/// Structurally invalid items — deleted-record payloads missing their
/// barcode or location — are silently out of scope rather than errors.
pub fn is_item_eligible(item: &Item) -> bool {
    let has_barcode = item.barcode.as_deref().is_some_and(|b| !b.is_empty());
    let location_code = item.location_code().filter(|c| !c.is_empty());

    match (has_barcode, location_code) {
        (true, Some(code)) => is_offsite_location(code),
        _ => false,
    }
}
