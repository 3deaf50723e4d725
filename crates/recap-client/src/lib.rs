//! recap-client: HTTP collaborators for the recap-sync engine
//!
//! Implements the collaborator traits `recap-core` consumes:
//! - [`scsb::ScsbClient`] — the SCSB `searchService/search` endpoint
//! - [`platform::PlatformClient`] — catalog item lookup and the outbound
//!   sync-message post
//! - [`mappings::MappingsClient`] — the NYPL-core reference mappings
//!
//! Response parsing is kept in pure functions over JSON strings so it can
//! be tested without a network.

pub mod http;
pub mod mappings;
pub mod platform;
pub mod scsb;

pub use http::{HttpClient, HttpError};
pub use mappings::MappingsClient;
pub use platform::PlatformClient;
pub use scsb::ScsbClient;
