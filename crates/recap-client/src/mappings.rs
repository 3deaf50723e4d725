//! NYPL-core reference mapping fetcher
//!
//! The two classification mappings are published as static JSON objects.
//! Their wire shapes differ slightly (`collectionType` on item types,
//! `collectionTypes` on locations, either possibly null); both normalize
//! into [`MappingEntry`] maps. Fetched once at startup — malformed
//! payloads here poison every classification, so they are hard errors.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use url::Url;

use recap_core::reference::MappingEntry;
use recap_core::{RecapError, Result};

use crate::http::{HttpClient, HttpError};

const CATALOG_ITEM_TYPE_FILE: &str = "by_catalog_item_type.json";
const LOCATION_FILE: &str = "by_sierra_location.json";

#[derive(Debug, Deserialize)]
struct CatalogItemTypeEntry {
    #[serde(rename = "collectionType", default)]
    collection_type: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    #[serde(rename = "collectionTypes", default)]
    collection_types: Option<Vec<String>>,
}

pub struct MappingsClient {
    http: HttpClient,
    base_url: Url,
}

impl MappingsClient {
    pub fn new(base_url: &str) -> std::result::Result<Self, HttpError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(
            |_| HttpError::InvalidUrl {
                url: base_url.to_string(),
            },
        )?;

        Ok(Self {
            http: HttpClient::default(),
            base_url,
        })
    }

    async fn fetch(&self, file: &str) -> Result<String> {
        let url = self
            .base_url
            .join(file)
            .map_err(|e| RecapError::Reference(e.to_string()))?;

        self.http
            .get(url.as_str(), &[])
            .await
            .map_err(|e| RecapError::Reference(format!("fetching {file}: {e}")))
    }

    /// Fetch the catalog-item-type -> collection-type mapping
    pub async fn by_catalog_item_type(&self) -> Result<HashMap<String, MappingEntry>> {
        let body = self.fetch(CATALOG_ITEM_TYPE_FILE).await?;
        let mapping = parse_catalog_item_type_mapping(&body)?;
        info!(entries = mapping.len(), "loaded catalog item type mapping");
        Ok(mapping)
    }

    /// Fetch the Sierra-location -> collection-type mapping
    pub async fn by_location(&self) -> Result<HashMap<String, MappingEntry>> {
        let body = self.fetch(LOCATION_FILE).await?;
        let mapping = parse_location_mapping(&body)?;
        info!(entries = mapping.len(), "loaded location mapping");
        Ok(mapping)
    }
}

pub fn parse_catalog_item_type_mapping(json: &str) -> Result<HashMap<String, MappingEntry>> {
    let raw: HashMap<String, Value> = serde_json::from_str(json)
        .map_err(|e| RecapError::Reference(format!("Invalid catalog item type mapping: {e}")))?;

    raw.into_iter()
        .map(|(code, value)| {
            let entry: CatalogItemTypeEntry = serde_json::from_value(value).map_err(|e| {
                RecapError::Reference(format!("Invalid catalog item type entry {code}: {e}"))
            })?;
            Ok((
                code,
                MappingEntry {
                    collection_types: entry.collection_type.unwrap_or_default(),
                },
            ))
        })
        .collect()
}

pub fn parse_location_mapping(json: &str) -> Result<HashMap<String, MappingEntry>> {
    let raw: HashMap<String, Value> = serde_json::from_str(json)
        .map_err(|e| RecapError::Reference(format!("Invalid location mapping: {e}")))?;

    raw.into_iter()
        .map(|(code, value)| {
            let entry: LocationEntry = serde_json::from_value(value).map_err(|e| {
                RecapError::Reference(format!("Invalid location entry {code}: {e}"))
            })?;
            Ok((
                code,
                MappingEntry {
                    collection_types: entry.collection_types.unwrap_or_default(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_item_type_mapping_with_nulls() {
        let json = r#"{
            "55": { "code": "55", "label": "book, limited circ", "collectionType": ["Research"] },
            "3": { "code": "3", "label": "book, circulating", "collectionType": ["Branch", "Circulating"] },
            "99": { "code": "99", "label": "undefined", "collectionType": null }
        }"#;

        let mapping = parse_catalog_item_type_mapping(json).unwrap();
        assert_eq!(mapping["55"].collection_types, vec!["Research"]);
        assert_eq!(mapping["3"].collection_types.len(), 2);
        assert!(mapping["99"].collection_types.is_empty());
    }

    #[test]
    fn parses_location_mapping() {
        let json = r#"{
            "rc2ma": { "code": "rc2ma", "label": "OFFSITE", "collectionTypes": ["Research"] },
            "mal": { "code": "mal", "label": "SASB", "collectionTypes": ["Research", "Branch"] }
        }"#;

        let mapping = parse_location_mapping(json).unwrap();
        assert_eq!(mapping["rc2ma"].collection_types, vec!["Research"]);
        assert_eq!(mapping["mal"].collection_types.len(), 2);
    }

    #[test]
    fn malformed_mapping_is_a_reference_error() {
        let err = parse_catalog_item_type_mapping("[]").unwrap_err();
        assert!(matches!(err, RecapError::Reference(_)));

        let err = parse_location_mapping(r#"{ "rc2ma": { "collectionTypes": "Research" } }"#)
            .unwrap_err();
        assert!(matches!(err, RecapError::Reference(_)));
    }
}
