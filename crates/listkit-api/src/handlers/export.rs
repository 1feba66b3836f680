//! Export generation handler.

use axum::extract::{Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use listkit_export::ExportRequest;
use listkit_models::{
    ChannelId, ContentEncoding, ExportArtifact, ExportFormat, ListingId, ValidationResult,
};

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for export generation. Every field is optional; an empty
/// body requests the default flat-file export.
#[derive(Debug, Deserialize)]
pub struct GenerateExportRequest {
    #[serde(default)]
    pub format: ExportFormat,
    /// Include the channel's flat file inside a package export.
    #[serde(default = "default_include_flat_file")]
    pub include_flat_file: bool,
}

fn default_include_flat_file() -> bool {
    true
}

impl Default for GenerateExportRequest {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            include_flat_file: true,
        }
    }
}

/// Generated file payload.
#[derive(Debug, Serialize)]
pub struct FilePayload {
    pub name: String,
    /// UTF-8 text or base64, per `encoding`.
    pub content: String,
    pub content_type: String,
    pub encoding: ContentEncoding,
}

impl From<ExportArtifact> for FilePayload {
    fn from(artifact: ExportArtifact) -> Self {
        let content = match artifact.encoding {
            ContentEncoding::Utf8 => String::from_utf8_lossy(&artifact.content).into_owned(),
            ContentEncoding::Base64 => BASE64.encode(&artifact.content),
        };
        Self {
            name: artifact.file_name,
            content,
            content_type: artifact.content_type,
            encoding: artifact.encoding,
        }
    }
}

/// Response for export generation.
#[derive(Debug, Serialize)]
pub struct GenerateExportResponse {
    pub success: bool,
    pub file: FilePayload,
    pub validation: ValidationResult,
}

/// Generate an export artifact for a listing/channel pair.
///
/// POST /api/listings/{listing_id}/channels/{channel_id}/export
pub async fn generate_export(
    State(state): State<AppState>,
    Path((listing_id, channel_id)): Path<(String, String)>,
    body: Option<Json<GenerateExportRequest>>,
) -> ApiResult<Json<GenerateExportResponse>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let outcome = state
        .service
        .generate_export(ExportRequest {
            listing_id: ListingId::from_string(&listing_id),
            channel_id: ChannelId::from_string(&channel_id),
            format: request.format,
            include_flat_file: request.include_flat_file,
        })
        .await?;

    info!(
        listing_id = %listing_id,
        channel_id = %channel_id,
        format = request.format.as_str(),
        "Export request served"
    );

    Ok(Json(GenerateExportResponse {
        success: true,
        file: outcome.artifact.into(),
        validation: outcome.validation,
    }))
}
