//! ClipSynth Core Library
//!
//! Core functionality for importing videos (direct uploads or YouTube URLs),
//! generating transcripts, and finding highlight segments for short-form
//! clip creation.

pub mod error;
pub mod format;
pub mod highlight;
pub mod importer;
pub mod llm;
pub mod media;
pub mod session;
pub mod transcript;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use error::{ClipSynthError, Result};
pub use format::{format_timestamp, format_transcript};
pub use highlight::{HighlightStrategy, KeywordHighlighter, ModelHighlighter, find_highlights};
pub use importer::{ImportSource, Importer, MockImporter, ProgressFn};
pub use llm::{Provider, ProviderConfig};
pub use media::FileImporter;
pub use session::{ImportSession, UploadStatus, run_import};
pub use transcript::TranscriptGenerator;
pub use types::{TranscriptSegment, VideoDetails, VideoSource};
pub use youtube::YoutubeImporter;
