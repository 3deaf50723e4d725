//! The reconciliation decision engine
//!
//! One entry point per record kind. Each decides eligibility, resolves
//! the remote counterpart, and either produces a [`SyncMessage`] or
//! concludes there is nothing to sync. Processing is side-effect-free up
//! to the returned message, so replaying the same change event yields the
//! same decision.

use tracing::{debug, info};

use crate::check_digit::compute_check_digit;
use crate::classify::{self, CatalogItems};
use crate::error::Result;
use crate::models::{Bib, Item, SyncMessage};
use crate::reference::ReferenceData;
use crate::resolve::{self, RemoteInventorySearch, Resolution};

/// Source tag stamped on every outbound message
pub const MESSAGE_SOURCE: &str = "bib-item-store-update";

/// Action value signaling an ownership transfer
pub const TRANSFER_ACTION: &str = "transfer";

/// Decision engine over the two collaborator seams.
///
/// Holds only borrowed, read-only state; construct once per batch and
/// feed it records sequentially.
pub struct Reconciler<'a, S, C> {
    reference: &'a ReferenceData,
    search: &'a S,
    catalog: &'a C,
    notification_email: &'a str,
}

impl<'a, S, C> Reconciler<'a, S, C>
where
    S: RemoteInventorySearch,
    C: CatalogItems,
{
    pub fn new(
        reference: &'a ReferenceData,
        search: &'a S,
        catalog: &'a C,
        notification_email: &'a str,
    ) -> Self {
        Self {
            reference,
            search,
            catalog,
            notification_email,
        }
    }

    /// Item path: skip out-of-scope items, resolve the barcode remotely,
    /// and decide update vs transfer from the owning bib ids.
    ///
    /// A placeholder remote record never signals a transfer: its owning
    /// bib id is a temporary stand-in that is expected to disagree.
    pub async fn process_item(&self, item: &Item) -> Result<Option<SyncMessage>> {
        if !classify::is_item_eligible(item) {
            debug!(
                item_id = ?item.id,
                location = ?item.location_code(),
                "skipping item outside the recap domain"
            );
            return Ok(None);
        }

        // Eligibility guarantees a non-empty barcode
        let barcode = item.barcode.clone().unwrap_or_default();

        let remote = match resolve::resolve_by_barcode(self.search, &barcode).await? {
            Resolution::Found(record) => record,
            Resolution::NotFound => {
                info!(%barcode, "barcode not in remote inventory; nothing to reconcile");
                return Ok(None);
            }
        };

        let transfer_target = item.bib_ids.first().and_then(|local_bib| {
            let padded = format!("b{}", compute_check_digit(local_bib));
            let expected = format!(".{padded}");
            let mismatch = remote.owning_institution_bib_id.as_deref() != Some(expected.as_str());
            (mismatch && !remote.is_placeholder()).then_some(padded)
        });

        if let Some(target) = &transfer_target {
            info!(
                %barcode,
                %target,
                remote_bib = ?remote.owning_institution_bib_id,
                "remote record changed bib ownership"
            );
        }

        Ok(Some(SyncMessage {
            barcodes: vec![barcode],
            user_email: self.notification_email.to_string(),
            source: MESSAGE_SOURCE.to_string(),
            action: transfer_target
                .is_some()
                .then(|| TRANSFER_ACTION.to_string()),
            bib_id: transfer_target,
        }))
    }

    /// Bib path: skip out-of-scope bibs, then collect every barcode of
    /// the bib's remote holdings — top-level rows plus their serial /
    /// multi-part child rows, order preserved, duplicates kept.
    ///
    /// Transfer detection is defined only at single-item granularity, so
    /// this path never sets an action.
    pub async fn process_bib(&self, bib: &Bib) -> Result<Option<SyncMessage>> {
        if !classify::is_bib_eligible(bib, self.reference, self.catalog).await? {
            debug!(bib_id = %bib.id, "skipping bib outside the recap domain");
            return Ok(None);
        }

        let records = resolve::resolve_by_bib_id(self.search, &bib.id).await?;
        if records.is_empty() {
            info!(bib_id = %bib.id, "bib has no remote holdings; nothing to reconcile");
            return Ok(None);
        }

        let barcodes: Vec<String> = records
            .iter()
            .flat_map(|record| record.all_barcodes())
            .map(String::from)
            .collect();

        if barcodes.is_empty() {
            info!(bib_id = %bib.id, "remote holdings carry no barcodes; nothing to sync");
            return Ok(None);
        }

        Ok(Some(SyncMessage {
            barcodes,
            user_email: self.notification_email.to_string(),
            source: MESSAGE_SOURCE.to_string(),
            action: None,
            bib_id: None,
        }))
    }
}
