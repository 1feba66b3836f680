//! Channel definitions and validation rule sets.
//!
//! Rules are data, not behavior: nothing channel-specific executes here.
//! The export engine's registry owns the catalog of known channels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ChannelId;

/// A channel's default export-format category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatCategory {
    /// Delimited flat file for bulk upload
    #[default]
    FlatText,
    /// Formatted document for manual entry
    Document,
    /// Composite archive (document + images + instructions)
    Archive,
}

impl FormatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatCategory::FlatText => "flat_text",
            FormatCategory::Document => "document",
            FormatCategory::Archive => "archive",
        }
    }
}

/// Tag constraints for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TagRule {
    /// Minimum number of tags
    pub min_count: u32,
    /// Maximum number of tags
    pub max_count: u32,
    /// Maximum length of a single tag, in characters
    pub max_length: u32,
}

/// Severity applied when a listing falls short of a channel's bullet count.
///
/// Marketplaces disagree on whether bullets are structural (Amazon's five
/// feature bullets) or advisory, so the severity is channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BulletPolicy {
    /// Shortfall is a non-blocking warning
    #[default]
    Warn,
    /// Shortfall is a blocking error
    Require,
}

/// Bullet-point constraints for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BulletRule {
    /// Number of bullet points the channel expects
    pub required_count: u32,
    /// Severity when the listing has fewer
    pub policy: BulletPolicy,
}

/// Content rules a resolved listing must satisfy for a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChannelRules {
    /// Maximum title length, in characters
    pub title_max_length: u32,

    /// Maximum description length, in characters
    pub description_max_length: u32,

    /// Tag constraints, if the channel uses tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagRule>,

    /// Bullet-point constraints, if the channel uses bullets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<BulletRule>,

    /// Minimum number of images
    pub min_images: u32,

    /// Recommended number of images (shortfall is a warning)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_images: Option<u32>,

    /// Whether the channel expects a materials list
    #[serde(default)]
    pub requires_materials: bool,
}

/// A target marketplace with its own content rules and export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Channel {
    /// Channel ID
    pub id: ChannelId,

    /// Stable machine slug (e.g. "etsy")
    pub slug: String,

    /// Human-readable name (e.g. "Etsy")
    pub display_name: String,

    /// Default export-format category
    pub format_category: FormatCategory,

    /// Validation rule set
    pub rules: ChannelRules,
}

impl Channel {
    /// Create a channel definition.
    pub fn new(
        id: ChannelId,
        slug: impl Into<String>,
        display_name: impl Into<String>,
        format_category: FormatCategory,
        rules: ChannelRules,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            display_name: display_name.into(),
            format_category,
            rules,
        }
    }
}
