//! Platform API client
//!
//! Two concerns share this client, as they share the API: the catalog
//! item lookup backing bib classification, and the outbound post of
//! finished sync messages.

use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use recap_core::classify::CatalogItems;
use recap_core::models::{Item, SyncMessage};
use recap_core::{RecapError, Result};

use crate::http::{HttpClient, HttpError};

const SYNC_PATH: &str = "recap/sync-item-metadata-to-scsb";

pub struct PlatformClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl PlatformClient {
    pub fn new(base_url: &str, token: Option<String>) -> std::result::Result<Self, HttpError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(
            |_| HttpError::InvalidUrl {
                url: base_url.to_string(),
            },
        )?;

        Ok(Self {
            http: HttpClient::default(),
            base_url,
            token,
        })
    }

    fn auth_headers(&self) -> Vec<(&str, &str)> {
        self.token
            .as_deref()
            .map(|t| ("authorization", t))
            .into_iter()
            .collect()
    }

    fn join(&self, path: &str) -> std::result::Result<Url, HttpError> {
        self.base_url.join(path).map_err(|_| HttpError::InvalidUrl {
            url: path.to_string(),
        })
    }

    /// Post a finished sync message to the recap sync endpoint.
    ///
    /// The receiver treats repeated identical messages as no-ops, so
    /// re-posting on event redelivery is safe.
    pub async fn post_sync_message(&self, message: &SyncMessage) -> Result<()> {
        let url = self
            .join(SYNC_PATH)
            .map_err(|e| RecapError::Catalog(e.to_string()))?;

        self.http
            .post_json(url.as_str(), message, &self.auth_headers())
            .await
            .map_err(|e| RecapError::Catalog(e.to_string()))?;

        debug!(barcodes = message.barcodes.len(), "posted sync message");
        Ok(())
    }
}

/// Parse an item-service response into its first item.
///
/// Anything short of a well-formed `data` array with a decodable first
/// element is absence, not an error — the caller treats the bib as
/// unclassifiable rather than failing the batch.
pub fn parse_first_item(json: &str) -> Option<Item> {
    let body: Value = match serde_json::from_str(json) {
        Ok(body) => body,
        Err(e) => {
            error!(%e, "undecodable item-service response");
            return None;
        }
    };

    let first = body.get("data")?.as_array()?.first()?.clone();
    match serde_json::from_value(first) {
        Ok(item) => Some(item),
        Err(e) => {
            error!(%e, "item-service row did not decode to an item");
            None
        }
    }
}

impl CatalogItems for PlatformClient {
    async fn first_item_for_bib(&self, bib_id: &str) -> Result<Option<Item>> {
        let url = self
            .join(&format!(
                "items?nyplSource=sierra-nypl&bibId={bib_id}&limit=1"
            ))
            .map_err(|e| RecapError::Catalog(e.to_string()))?;

        let body = self
            .http
            .get(url.as_str(), &self.auth_headers())
            .await
            .map_err(|e| RecapError::Catalog(e.to_string()))?;

        Ok(parse_first_item(&body))
    }
}
