//! Error types for recap-core

use thiserror::Error;

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, RecapError>;

/// Main error type for reconciliation operations
///
/// "Not found in remote inventory" and "record out of scope" are expected
/// outcomes, not errors; they are modeled as [`crate::resolve::Resolution`]
/// and `Option` respectively.
#[derive(Error, Debug)]
pub enum RecapError {
    /// Item record is structurally unusable for classification
    #[error("Malformed item record: {0}")]
    MalformedItem(String),

    /// Remote inventory search collaborator failed
    #[error("Remote inventory search failed: {0}")]
    Search(String),

    /// Catalog item lookup collaborator failed
    #[error("Catalog lookup failed: {0}")]
    Catalog(String),

    /// Reference mapping data is missing or malformed
    #[error("Reference data error: {0}")]
    Reference(String),

    /// Change record carries a schema this engine does not route
    #[error("Unrecognized schema: {0}. Must be one of Bib, Item")]
    UnrecognizedSchema(String),

    /// Change record payload did not decode to the routed schema
    #[error("Undecodable {schema} payload: {message}")]
    UndecodableRecord { schema: String, message: String },
}
