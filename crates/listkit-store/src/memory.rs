//! In-memory store used by tests and the dev server.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use listkit_models::{Channel, ChannelId, ExportLogEntry, ListingId, ListingRecord};

use crate::error::StoreResult;
use crate::traits::{ChannelListingAssociations, ChannelStore, ExportLog, ListingStore};

#[derive(Default)]
struct Inner {
    listings: HashMap<ListingId, ListingRecord>,
    channels: HashMap<ChannelId, Channel>,
    export_log: Vec<ExportLogEntry>,
    exported_at: HashMap<(ListingId, ChannelId), DateTime<Utc>>,
}

/// An in-memory implementation of every collaborator interface.
///
/// Cloning shares the underlying state, so a clone handed to the export
/// service observes seeds written through the original.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a listing record.
    pub async fn seed_listing(&self, record: ListingRecord) {
        let mut inner = self.inner.write().await;
        inner.listings.insert(record.base.id.clone(), record);
    }

    /// Insert or replace a channel definition.
    pub async fn seed_channel(&self, channel: Channel) {
        let mut inner = self.inner.write().await;
        inner.channels.insert(channel.id.clone(), channel);
    }

    /// Insert or replace several channel definitions.
    pub async fn seed_channels(&self, channels: impl IntoIterator<Item = Channel>) {
        let mut inner = self.inner.write().await;
        for channel in channels {
            inner.channels.insert(channel.id.clone(), channel);
        }
    }

    /// Total number of export-log entries (all listings).
    pub async fn export_log_len(&self) -> usize {
        self.inner.read().await.export_log.len()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn fetch_listing(&self, id: &ListingId) -> StoreResult<Option<ListingRecord>> {
        Ok(self.inner.read().await.listings.get(id).cloned())
    }
}

#[async_trait]
impl ChannelStore for MemoryStore {
    async fn fetch_channel(&self, id: &ChannelId) -> StoreResult<Option<Channel>> {
        Ok(self.inner.read().await.channels.get(id).cloned())
    }
}

#[async_trait]
impl ExportLog for MemoryStore {
    async fn append(&self, entry: ExportLogEntry) -> StoreResult<()> {
        debug!(
            listing_id = %entry.listing_id,
            channel_slug = %entry.channel_slug,
            success = entry.success,
            "Appending export-log entry"
        );
        self.inner.write().await.export_log.push(entry);
        Ok(())
    }

    async fn entries_for(&self, listing_id: &ListingId) -> StoreResult<Vec<ExportLogEntry>> {
        Ok(self
            .inner
            .read()
            .await
            .export_log
            .iter()
            .filter(|e| &e.listing_id == listing_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ChannelListingAssociations for MemoryStore {
    async fn mark_exported(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .exported_at
            .insert((listing_id.clone(), channel_id.clone()), at);
        Ok(())
    }

    async fn exported_at(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
    ) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self
            .inner
            .read()
            .await
            .exported_at
            .get(&(listing_id.clone(), channel_id.clone()))
            .copied())
    }
}
