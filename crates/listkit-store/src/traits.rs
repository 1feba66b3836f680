//! Collaborator interfaces consumed by the export engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use listkit_models::{Channel, ChannelId, ExportLogEntry, ListingId, ListingRecord};

use crate::error::StoreResult;

/// Read access to listings (base record plus channel overrides).
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch a listing by ID. `None` when the listing does not exist.
    async fn fetch_listing(&self, id: &ListingId) -> StoreResult<Option<ListingRecord>>;
}

/// Read access to channel definitions.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Fetch a channel by ID. `None` when the channel does not exist.
    async fn fetch_channel(&self, id: &ChannelId) -> StoreResult<Option<Channel>>;
}

/// Append-only sink for export attempts.
#[async_trait]
pub trait ExportLog: Send + Sync {
    /// Append one entry. Entries are never updated or deleted.
    async fn append(&self, entry: ExportLogEntry) -> StoreResult<()>;

    /// Entries recorded for a listing, oldest first.
    async fn entries_for(&self, listing_id: &ListingId) -> StoreResult<Vec<ExportLogEntry>>;
}

/// The channel-listing association's "exported at" marker.
#[async_trait]
pub trait ChannelListingAssociations: Send + Sync {
    /// Set the exported-at timestamp. Idempotent: repeating the call with a
    /// newer timestamp simply moves the marker forward.
    async fn mark_exported(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Read the marker, if the pair was ever exported.
    async fn exported_at(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
    ) -> StoreResult<Option<DateTime<Utc>>>;
}
