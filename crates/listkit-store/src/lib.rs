//! Persistence collaborator interfaces for the ListKit export backend.
//!
//! The durable store that owns listings and channels lives outside this
//! subsystem; these traits describe exactly what the export engine consumes:
//! read access to listings and channels, an append-only export log, and the
//! idempotent "exported at" marker on a channel-listing association.
//! [`MemoryStore`] implements all four for tests and the dev server.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::{ChannelListingAssociations, ChannelStore, ExportLog, ListingStore};
