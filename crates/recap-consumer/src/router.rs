//! Event routing
//!
//! Each change record arrives already decoded, tagged with its source
//! schema name. `Item` and `Bib` route to their reconciliation paths;
//! anything else aborts the batch — unrecognized data must fail loud, not
//! drop silently.

use serde::Deserialize;
use serde_json::Value;

use recap_core::models::{Bib, Item};
use recap_core::{RecapError, Result};

/// One decoded change record from the change stream
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    /// Source schema name, e.g. `Item` or `Bib`
    pub schema: String,
    /// Decoded record payload
    pub data: Value,
}

/// A record dispatched to its reconciliation path
#[derive(Debug, Clone)]
pub enum RoutedRecord {
    Item(Item),
    Bib(Bib),
}

pub fn route(record: EventRecord) -> Result<RoutedRecord> {
    match record.schema.as_str() {
        "Item" => serde_json::from_value(record.data)
            .map(RoutedRecord::Item)
            .map_err(|e| RecapError::UndecodableRecord {
                schema: record.schema,
                message: e.to_string(),
            }),
        "Bib" => serde_json::from_value(record.data)
            .map(RoutedRecord::Bib)
            .map_err(|e| RecapError::UndecodableRecord {
                schema: record.schema,
                message: e.to_string(),
            }),
        _ => Err(RecapError::UnrecognizedSchema(record.schema)),
    }
}
