//! Preflight handler.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use listkit_models::{ChannelId, ListingId, PreflightCheck, ValidationResult};

use crate::error::ApiResult;
use crate::state::AppState;

/// Response for preflight requests.
#[derive(Debug, Serialize)]
pub struct PreflightResponse {
    pub success: bool,
    pub channel_slug: String,
    pub channel_name: String,
    pub validation: ValidationResult,
    pub preflight_checks: Vec<PreflightCheck>,
}

/// Validation and checklist without generating anything.
///
/// GET /api/listings/{listing_id}/channels/{channel_id}/preflight
pub async fn get_preflight(
    State(state): State<AppState>,
    Path((listing_id, channel_id)): Path<(String, String)>,
) -> ApiResult<Json<PreflightResponse>> {
    let outcome = state
        .service
        .preflight(
            &ListingId::from_string(&listing_id),
            &ChannelId::from_string(&channel_id),
        )
        .await?;

    Ok(Json(PreflightResponse {
        success: true,
        channel_slug: outcome.channel.slug.clone(),
        channel_name: outcome.channel.display_name.clone(),
        validation: outcome.validation,
        preflight_checks: outcome.checks,
    }))
}
