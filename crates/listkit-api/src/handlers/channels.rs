//! Channel catalog handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use listkit_models::Channel;

use crate::state::AppState;

/// Response for the channel catalog.
#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelSummary>,
}

/// One catalog entry, with a flag for flat-file support so the editor can
/// grey out bulk upload for checker-only channels.
#[derive(Debug, Serialize)]
pub struct ChannelSummary {
    #[serde(flatten)]
    pub channel: Channel,
    pub supports_flat_file: bool,
}

/// List known channels and their rule sets.
///
/// GET /api/channels
pub async fn list_channels(State(state): State<AppState>) -> Json<ChannelsResponse> {
    let channels = state
        .registry
        .channels()
        .iter()
        .map(|channel| ChannelSummary {
            supports_flat_file: state.service.supports_flat_file(&channel.slug),
            channel: channel.clone(),
        })
        .collect();

    Json(ChannelsResponse { channels })
}
