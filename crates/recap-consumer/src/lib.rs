//! recap-consumer: change-event consumer for recap-sync
//!
//! Wires the decision engine to its HTTP collaborators: builds the
//! reference data snapshot once, routes each decoded change record to the
//! Item or Bib path, and posts whatever sync messages come out. Records
//! are processed strictly one at a time; a hard error (unrecognized
//! schema, malformed reference data, collaborator failure) aborts the
//! batch so the transport can retry it.

pub mod config;
pub mod reference_loader;
pub mod router;

use tracing::{debug, info};

use recap_client::PlatformClient;
use recap_core::classify::CatalogItems;
use recap_core::models::SyncMessage;
use recap_core::resolve::RemoteInventorySearch;
use recap_core::{Reconciler, Result};

use router::{route, EventRecord, RoutedRecord};

/// Outbound posting seam; the platform API implements it, tests stub it
#[allow(async_fn_in_trait)]
pub trait SyncPoster {
    async fn post(&self, message: &SyncMessage) -> Result<()>;
}

impl SyncPoster for PlatformClient {
    async fn post(&self, message: &SyncMessage) -> Result<()> {
        self.post_sync_message(message).await
    }
}

/// What happened to a processed batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: usize,
    pub posted: usize,
    pub skipped: usize,
}

/// Process one batch of decoded change records sequentially.
///
/// Each record is resolved to completion before the next is considered.
/// Skips (ineligible records, no remote match) are silent; any error
/// aborts the remainder of the batch.
pub async fn process_batch<S, C, P>(
    records: Vec<EventRecord>,
    reconciler: &Reconciler<'_, S, C>,
    poster: &P,
) -> Result<BatchSummary>
where
    S: RemoteInventorySearch,
    C: CatalogItems,
    P: SyncPoster,
{
    let mut summary = BatchSummary {
        records: records.len(),
        ..Default::default()
    };

    for record in records {
        let message = match route(record)? {
            RoutedRecord::Item(item) => reconciler.process_item(&item).await?,
            RoutedRecord::Bib(bib) => reconciler.process_bib(&bib).await?,
        };

        match message {
            Some(message) => {
                poster.post(&message).await?;
                info!(barcodes = message.barcodes.len(), action = ?message.action, "posted sync message");
                summary.posted += 1;
            }
            None => {
                debug!("record produced no sync message");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}
