//! Shared data models for the ListKit export backend.
//!
//! This crate provides Serde-serializable types for:
//! - Listing base records and per-channel overrides
//! - Channel definitions and validation rule sets
//! - The resolved listing view (base + override merge)
//! - Validation results, readiness scores and preflight checks
//! - Export artifacts, formats and export-log entries

pub mod artifact;
pub mod channel;
pub mod listing;
pub mod resolved;
pub mod utils;
pub mod validation;

// Re-export common types
pub use artifact::{ContentEncoding, ExportArtifact, ExportFormat, ExportLogEntry};
pub use channel::{BulletPolicy, BulletRule, Channel, ChannelRules, FormatCategory, TagRule};
pub use listing::{ChannelOverride, ImageRef, ListingBase, ListingRecord};
pub use resolved::ResolvedListingView;
pub use utils::sanitize_filename_title;
pub use validation::{
    CheckStatus, PreflightCheck, ValidationResult, SCORE_CAUTION_THRESHOLD, SCORE_GOOD_THRESHOLD,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    /// Generate a new random listing ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ListingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Generate a new random channel ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
