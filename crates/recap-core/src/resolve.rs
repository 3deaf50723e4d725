//! Remote inventory record resolution
//!
//! SCSB records that are still awaiting full cataloging ("incomplete"
//! placeholder records) are invisible to the default search scope, so
//! barcode resolution runs two phases: an exact search first, then the
//! same search rescoped to non-deleted, ungrouped, incomplete records.

use tracing::debug;

use crate::check_digit::compute_check_digit;
use crate::error::Result;
use crate::models::RemoteInventoryRecord;
use serde::Serialize;

/// Owning institution all searches are scoped to
pub const OWNING_INSTITUTION: &str = "NYPL";

/// Collection group designation of ungrouped (not yet assigned) records
const UNGROUPED: &str = "NA";

/// Cataloging status of placeholder records
const INCOMPLETE: &str = "Incomplete";

/// Remote inventory search collaborator (the SCSB search service)
#[allow(async_fn_in_trait)]
pub trait RemoteInventorySearch {
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<RemoteInventoryRecord>>;
}

/// Outcome of a barcode resolution.
///
/// `NotFound` is an expected result — the barcode is simply not in the
/// remote inventory yet — and is deliberately not an error.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(RemoteInventoryRecord),
    NotFound,
}

/// Body of an SCSB `searchService/search` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub field_name: String,
    pub field_value: String,
    pub owning_institutions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_group_designations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cataloging_status: Option<String>,
}

impl SearchFilter {
    fn new(field_name: &str, field_value: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_value: field_value.to_string(),
            owning_institutions: vec![OWNING_INSTITUTION.to_string()],
            deleted: None,
            collection_group_designations: None,
            cataloging_status: None,
        }
    }

    /// Exact barcode search
    pub fn by_barcode(barcode: &str) -> Self {
        Self::new("Barcode", barcode)
    }

    /// Search by the `.b`-prefixed, check-digit-padded owning bib id
    pub fn by_owning_bib_id(padded_bib_id: &str) -> Self {
        Self::new("OwningInstitutionBibId", padded_bib_id)
    }

    /// Rescope to non-deleted, ungrouped, incomplete placeholder records
    pub fn incomplete_only(mut self) -> Self {
        self.deleted = Some(false);
        self.collection_group_designations = Some(vec![UNGROUPED.to_string()]);
        self.cataloging_status = Some(INCOMPLETE.to_string());
        self
    }
}

/// Resolve a barcode against the remote inventory, falling back to the
/// incomplete-record scope when the exact search comes up empty. Returns
/// the first row of whichever phase matched.
pub async fn resolve_by_barcode<S: RemoteInventorySearch>(
    search: &S,
    barcode: &str,
) -> Result<Resolution> {
    let rows = search.search(&SearchFilter::by_barcode(barcode)).await?;
    if let Some(first) = rows.into_iter().next() {
        return Ok(Resolution::Found(first));
    }

    debug!(barcode, "no exact match; retrying in incomplete-record scope");
    let rows = search
        .search(&SearchFilter::by_barcode(barcode).incomplete_only())
        .await?;

    Ok(rows
        .into_iter()
        .next()
        .map_or(Resolution::NotFound, Resolution::Found))
}

/// Resolve every remote record owned by a local bib. The remote side keys
/// bibs by their padded form, so the digits-only local id is check-digit
/// padded and `.b`-prefixed before querying. An empty result is valid:
/// the bib has no remote holdings yet.
pub async fn resolve_by_bib_id<S: RemoteInventorySearch>(
    search: &S,
    bib_id: &str,
) -> Result<Vec<RemoteInventoryRecord>> {
    let padded = format!(".b{}", compute_check_digit(bib_id));
    search.search(&SearchFilter::by_owning_bib_id(&padded)).await
}
