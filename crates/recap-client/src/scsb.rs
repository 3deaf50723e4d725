//! SCSB search service client
//!
//! POSTs [`SearchFilter`] bodies to `searchService/search` and parses the
//! `searchResultRows` out of the response. The two-phase barcode
//! resolution itself lives in `recap-core`; this client is one search
//! call.

use serde::Deserialize;
use url::Url;

use recap_core::models::RemoteInventoryRecord;
use recap_core::resolve::{RemoteInventorySearch, SearchFilter};
use recap_core::{RecapError, Result};

use crate::http::{HttpClient, HttpError};

const SEARCH_PATH: &str = "searchService/search";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    search_result_rows: Vec<RemoteInventoryRecord>,
}

pub struct ScsbClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl ScsbClient {
    pub fn new(base_url: &str, api_key: &str) -> std::result::Result<Self, HttpError> {
        // Trailing slash so join() keeps any base path
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(
            |_| HttpError::InvalidUrl {
                url: base_url.to_string(),
            },
        )?;

        Ok(Self {
            http: HttpClient::default(),
            base_url,
            api_key: api_key.to_string(),
        })
    }

    async fn search_raw(&self, filter: &SearchFilter) -> std::result::Result<String, HttpError> {
        let url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|_| HttpError::InvalidUrl {
                url: SEARCH_PATH.to_string(),
            })?;

        self.http
            .post_json(url.as_str(), filter, &[("api_key", &self.api_key)])
            .await
    }
}

/// Parse an SCSB search response body into its result rows
pub fn parse_search_response(json: &str) -> Result<Vec<RemoteInventoryRecord>> {
    let response: SearchResponse = serde_json::from_str(json)
        .map_err(|e| RecapError::Search(format!("Invalid SCSB search response: {e}")))?;
    Ok(response.search_result_rows)
}

impl RemoteInventorySearch for ScsbClient {
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<RemoteInventoryRecord>> {
        let body = self
            .search_raw(filter)
            .await
            .map_err(|e| RecapError::Search(e.to_string()))?;
        parse_search_response(&body)
    }
}
