use axum::{
    Json,
    extract::{Multipart, State},
};
use clipsynth_core::{ImportSource, VideoDetails, youtube};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// `POST /api/videos/upload-file` — multipart form with a `video` field.
/// The body is streamed to a uniquely named file in the uploads directory,
/// then normalized into a `VideoDetails` record.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoDetails>> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("video") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let stored = state.file_importer.stored_path_for(&original_name);

        tokio::fs::create_dir_all(state.file_importer.uploads_dir())
            .await
            .map_err(|e| ApiError::internal(format!("create uploads dir failed: {e}")))?;
        let mut file = tokio::fs::File::create(&stored)
            .await
            .map_err(|e| ApiError::internal(format!("create upload file failed: {e}")))?;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::bad_request(format!("Upload stream interrupted: {e}")))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| ApiError::internal(format!("write upload failed: {e}")))?;
        }
        file.flush()
            .await
            .map_err(|e| ApiError::internal(format!("flush upload failed: {e}")))?;

        let details = state
            .file_importer
            .describe_stored(&stored, &original_name)
            .await?;

        info!(
            id = %details.id,
            name = %details.name,
            duration = details.duration,
            "file upload imported"
        );
        return Ok(Json(details));
    }

    Err(ApiError::bad_request("No video file attached"))
}

#[derive(Deserialize)]
pub struct ImportYoutubeRequest {
    #[serde(default)]
    pub url: String,
}

/// `POST /api/videos/import-youtube` — validates the URL shape before any
/// network work; malformed input never reaches the metadata fetch.
pub async fn import_youtube(
    State(state): State<AppState>,
    Json(request): Json<ImportYoutubeRequest>,
) -> ApiResult<Json<VideoDetails>> {
    let url = request.url.trim().to_string();
    if url.is_empty() {
        return Err(ApiError::bad_request("A YouTube URL is required"));
    }
    youtube::parse_video_id(&url)?;

    let details = state
        .youtube_importer
        .import(&ImportSource::Youtube { url }, Box::new(|_| {}))
        .await?;

    info!(id = %details.id, name = %details.name, "youtube video imported");
    Ok(Json(details))
}
