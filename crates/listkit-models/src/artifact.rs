//! Export artifacts, formats and export-log entries.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ChannelId, ListingId};

/// The artifact kind a caller requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Delimited bulk-upload file (the default)
    #[default]
    FlatFile,
    /// Standalone formatted document
    Document,
    /// Composite archive: document + images + instructions
    Package,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::FlatFile => "flat_file",
            ExportFormat::Document => "document",
            ExportFormat::Package => "package",
        }
    }
}

/// How [`ExportArtifact::content`] should be carried in a JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentEncoding {
    /// Content is valid UTF-8 text
    Utf8,
    /// Content is binary and must be base64-encoded on the wire
    Base64,
}

/// A generated export payload. Ephemeral: produced per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Suggested download filename
    pub file_name: String,

    /// Raw bytes
    pub content: Vec<u8>,

    /// MIME content type
    pub content_type: String,

    /// Wire encoding for JSON transports
    pub encoding: ContentEncoding,
}

impl ExportArtifact {
    /// Create a UTF-8 text artifact.
    pub fn text(
        file_name: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into().into_bytes(),
            content_type: content_type.into(),
            encoding: ContentEncoding::Utf8,
        }
    }

    /// Create a binary artifact.
    pub fn binary(
        file_name: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            content_type: content_type.into(),
            encoding: ContentEncoding::Base64,
        }
    }
}

/// Append-only record of an export attempt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportLogEntry {
    /// Entry ID
    pub id: String,

    /// Listing that was exported
    pub listing_id: ListingId,

    /// Target channel
    pub channel_id: ChannelId,

    /// Channel slug at export time
    pub channel_slug: String,

    /// Requested format
    pub format: ExportFormat,

    /// Generated filename, when generation succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Whether an artifact was produced
    pub success: bool,

    /// Failure summary, when the export was refused or failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Readiness score at export time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    /// When the attempt happened
    pub created_at: DateTime<Utc>,
}

impl ExportLogEntry {
    /// Record a successful export.
    pub fn success(
        listing_id: ListingId,
        channel_id: ChannelId,
        channel_slug: impl Into<String>,
        format: ExportFormat,
        file_name: impl Into<String>,
        score: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id,
            channel_id,
            channel_slug: channel_slug.into(),
            format,
            file_name: Some(file_name.into()),
            success: true,
            error: None,
            score: Some(score),
            created_at: Utc::now(),
        }
    }

    /// Record a refused or failed export.
    pub fn failure(
        listing_id: ListingId,
        channel_id: ChannelId,
        channel_slug: impl Into<String>,
        format: ExportFormat,
        error: impl Into<String>,
        score: Option<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id,
            channel_id,
            channel_slug: channel_slug.into(),
            format,
            file_name: None,
            success: false,
            error: Some(error.into()),
            score,
            created_at: Utc::now(),
        }
    }
}
