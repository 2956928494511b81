use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use clipsynth_core::{
    FileImporter, ImportSource, Importer, KeywordHighlighter, ProgressFn, Result,
    TranscriptGenerator, VideoDetails,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use clipsynth_server::{AppState, router};

/// Stub importer that must never be reached: proves handler-side
/// validation short-circuits before any metadata fetch.
struct UnreachableImporter;

#[async_trait]
impl Importer for UnreachableImporter {
    async fn import(&self, source: &ImportSource, _on_progress: ProgressFn) -> Result<VideoDetails> {
        panic!("importer invoked for {}", source.name());
    }
}

fn test_app(dir: &std::path::Path) -> Router {
    let state = AppState {
        file_importer: Arc::new(FileImporter::new(
            dir.join("uploads"),
            "/uploads",
            TranscriptGenerator::local(),
        )),
        youtube_importer: Arc::new(UnreachableImporter),
        highlighter: Arc::new(KeywordHighlighter),
    };
    router(state, &dir.join("uploads"), 64 * 1024 * 1024)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(dir.path())
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn import_youtube_rejects_invalid_url_before_fetching_metadata() {
    let dir = tempfile::tempdir().unwrap();
    // UnreachableImporter panics if invoked, so a clean 400 also proves
    // the metadata step was never reached.
    let response = test_app(dir.path())
        .oneshot(json_request(
            "/api/videos/import-youtube",
            serde_json::json!({ "url": "not a url at all" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn import_youtube_rejects_empty_url() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(dir.path())
        .oneshot(json_request(
            "/api/videos/import-youtube",
            serde_json::json!({ "url": "  " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn find_highlights_rejects_empty_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(dir.path())
        .oneshot(json_request(
            "/api/highlights/find",
            serde_json::json!({ "transcript": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn find_highlights_returns_subset_of_input_ids() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = serde_json::json!({
        "transcript": [
            { "id": "seg-1", "text": "welcome to the stream", "start": 0.0, "end": 4.0 },
            { "id": "seg-2", "text": "this trick is a game-changer", "start": 4.0, "end": 9.0 },
            { "id": "seg-3", "text": "see you next time", "start": 9.0, "end": 12.0 }
        ]
    });

    let response = test_app(dir.path())
        .oneshot(json_request("/api/highlights/find", transcript))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body["highlightIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| ["seg-1", "seg-2", "seg-3"].contains(id)));
    assert!(ids.contains(&"seg-2"));
}

#[tokio::test]
async fn upload_without_video_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let boundary = "clipsynth-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
    );

    let response = test_app(dir.path())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos/upload-file")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No video file attached");
}
