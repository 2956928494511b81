use axum::{Json, extract::State};
use clipsynth_core::TranscriptSegment;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Deserialize)]
pub struct FindHighlightsRequest {
    #[serde(default)]
    pub transcript: Vec<TranscriptSegment>,
}

#[derive(Serialize)]
pub struct FindHighlightsResponse {
    #[serde(rename = "highlightIds")]
    pub highlight_ids: Vec<String>,
}

/// `POST /api/highlights/find` — derives a highlight set from a transcript.
/// The returned ids are always a subset of the input segment ids.
pub async fn find(
    State(state): State<AppState>,
    Json(request): Json<FindHighlightsRequest>,
) -> ApiResult<Json<FindHighlightsResponse>> {
    if request.transcript.is_empty() {
        return Err(ApiError::bad_request("A non-empty transcript is required"));
    }

    let highlight_ids = state.highlighter.find_highlights(&request.transcript).await;
    Ok(Json(FindHighlightsResponse { highlight_ids }))
}
