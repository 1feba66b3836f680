//! Listing base records and per-channel overrides.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{ChannelId, ListingId};

/// Reference to a listing image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageRef {
    /// Source URL of the image.
    pub url: String,

    /// Alt text for accessibility and marketplace image metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// 1-based display position.
    #[serde(default = "default_position")]
    pub position: u32,
}

fn default_position() -> u32 {
    1
}

impl ImageRef {
    /// Create an image reference at the given 1-based position.
    pub fn new(url: impl Into<String>, position: u32) -> Self {
        Self {
            url: url.into(),
            alt: None,
            position,
        }
    }
}

/// The canonical, channel-agnostic product content.
///
/// Owned and mutated by the listing editor upstream of this subsystem;
/// read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListingBase {
    /// Listing ID
    pub id: ListingId,

    /// Product title
    pub title: String,

    /// Product description
    pub description: String,

    /// Price in the shop currency
    pub price: f64,

    /// Available quantity
    pub quantity: u32,

    /// Shop category / section
    pub category: String,

    /// Materials the product is made of
    #[serde(default)]
    pub materials: Vec<String>,

    /// Image references, in display order
    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Optional product video URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A per-channel delta layered over [`ListingBase`].
///
/// Every field is optional; a missing or empty value means "use the base".
/// Array fields tolerate null/missing JSON via `#[serde(default)]` so a
/// record written without tags or bullets can never crash the merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChannelOverride {
    /// Channel this override targets
    pub channel_id: ChannelId,

    /// Channel slug, carried for diagnostics
    pub channel_slug: String,

    /// Channel-specific title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Channel-specific description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Channel-specific tags / keywords
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Channel-specific bullet points ("key features")
    #[serde(default)]
    pub bullet_points: Option<Vec<String>>,

    /// Channel-specific materials list
    #[serde(default)]
    pub materials: Option<Vec<String>>,

    /// Channel-specific price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Free-form channel-specific fields (e.g. eBay item specifics)
    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
}

/// A listing as fetched from the listing store: the base record plus all
/// channel overrides associated with it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListingRecord {
    pub base: ListingBase,

    #[serde(default)]
    pub overrides: Vec<ChannelOverride>,
}

impl ListingRecord {
    /// Find the override for a channel, if one exists.
    pub fn override_for(&self, channel_id: &ChannelId) -> Option<&ChannelOverride> {
        self.overrides.iter().find(|o| &o.channel_id == channel_id)
    }
}
