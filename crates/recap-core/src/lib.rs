//! recap-core: decision engine for ReCAP inventory reconciliation
//!
//! This library decides, for each changed Sierra catalog record, whether it
//! belongs to the off-site (ReCAP) inventory domain and what sync
//! instruction — plain refresh or ownership transfer — the remote SCSB
//! inventory should receive:
//! - Sierra mod-11 check-digit computation for cross-referencing ids
//! - Location and collection-type classification (the eligibility rules)
//! - Two-phase remote record resolution (exact, then incomplete-record
//!   fallback)
//! - The update-vs-transfer decision, including the placeholder-record
//!   edge case
//!
//! Network collaborators (SCSB search, catalog item lookup) are traits
//! implemented elsewhere; everything here is deterministic given their
//! responses.

pub mod check_digit;
pub mod classify;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod reference;
pub mod resolve;

pub use check_digit::compute_check_digit;
pub use error::{RecapError, Result};
pub use models::{Bib, Item, RemoteInventoryRecord, SyncMessage};
pub use reconcile::Reconciler;
pub use reference::ReferenceData;
pub use resolve::{Resolution, SearchFilter};
