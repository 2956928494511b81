use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

use crate::{
    importer::{ImportSource, Importer, ProgressFn},
    types::VideoDetails,
};

/// Lifecycle of one import attempt. Exactly one status is active per
/// session; `Success` and `Error` are terminal until an explicit reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Success,
    Error,
}

const UNKNOWN_ERROR: &str = "unknown error";

/// The upload/import state machine driving the UI flow
/// IDLE → UPLOADING → PROCESSING → (SUCCESS | ERROR).
///
/// The machine is intentionally tolerant: progress callbacks may repeat,
/// decrease, or never arrive, and only well-defined transitions change
/// state. Everything else is ignored.
#[derive(Debug, Default)]
pub struct ImportSession {
    status: UploadStatus,
    progress: u8,
    error: Option<String>,
    result: Option<VideoDetails>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&VideoDetails> {
        self.result.as_ref()
    }

    /// Begin an import. Only valid from `Idle`; returns false otherwise
    /// (the UI disables further action while an import is in flight).
    pub fn start(&mut self) -> bool {
        if self.status != UploadStatus::Idle {
            return false;
        }
        self.status = UploadStatus::Uploading;
        self.progress = 0;
        self.error = None;
        self.result = None;
        true
    }

    /// Record transfer progress. Ignored outside `Uploading`; decreasing
    /// values are ignored; reaching 100 moves to `Processing` exactly once.
    pub fn report_progress(&mut self, pct: u8) {
        if self.status != UploadStatus::Uploading {
            return;
        }
        let pct = pct.min(100);
        if pct < self.progress {
            return;
        }
        self.progress = pct;
        if pct == 100 {
            self.status = UploadStatus::Processing;
        }
    }

    /// The import call resolved with a fully populated record. Accepted
    /// from `Processing`, and from `Uploading` because the importer may
    /// legitimately skip every progress callback.
    pub fn resolved(&mut self, details: VideoDetails) {
        if !matches!(
            self.status,
            UploadStatus::Uploading | UploadStatus::Processing
        ) {
            return;
        }
        self.progress = 100;
        self.result = Some(details);
        self.status = UploadStatus::Success;
    }

    /// The import call rejected. The message is surfaced verbatim, with a
    /// generic fallback when the rejection carries no message.
    pub fn failed(&mut self, message: Option<String>) {
        if !matches!(
            self.status,
            UploadStatus::Uploading | UploadStatus::Processing
        ) {
            return;
        }
        let message = message.filter(|m| !m.trim().is_empty());
        self.error = Some(message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()));
        self.status = UploadStatus::Error;
    }

    /// Return to `Idle` from any state, clearing progress, error, and result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Drive one import through a shared session: start, wire the importer's
/// progress callback into the machine (and an observer hook, e.g. a
/// progress bar), await resolution behind a bounded timeout, and map the
/// outcome onto the terminal state.
///
/// Dropping the returned future aborts the in-flight import; pair that
/// with `reset` for user-initiated cancellation.
pub async fn run_import<F>(
    session: &Arc<Mutex<ImportSession>>,
    importer: &dyn Importer,
    source: ImportSource,
    timeout: Duration,
    on_progress: F,
) -> UploadStatus
where
    F: Fn(u8) + Send + Sync + 'static,
{
    if !session.lock().unwrap().start() {
        return session.lock().unwrap().status();
    }

    let progress_session = Arc::clone(session);
    let callback: ProgressFn = Box::new(move |pct| {
        progress_session.lock().unwrap().report_progress(pct);
        on_progress(pct);
    });

    match tokio::time::timeout(timeout, importer.import(&source, callback)).await {
        Ok(Ok(details)) => session.lock().unwrap().resolved(details),
        Ok(Err(err)) => session.lock().unwrap().failed(Some(err.to_string())),
        Err(_) => {
            tracing::warn!(source = source.name(), "import timed out");
            session.lock().unwrap().failed(Some(format!(
                "import timed out after {}s",
                timeout.as_secs()
            )));
        }
    }

    session.lock().unwrap().status()
}
