use std::sync::Arc;
use std::time::Duration;

use clipsynth_core::{
    FileImporter, HighlightStrategy, Importer, KeywordHighlighter, ModelHighlighter,
    TranscriptGenerator, YoutubeImporter,
};

use crate::config::ServerConfig;

const LLM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub file_importer: Arc<FileImporter>,
    pub youtube_importer: Arc<dyn Importer>,
    pub highlighter: Arc<dyn HighlightStrategy>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(LLM_TIMEOUT)
            .build()
            .unwrap_or_default();

        let transcriber = TranscriptGenerator::new(config.provider.clone(), client.clone());
        let file_importer = Arc::new(FileImporter::new(
            config.uploads_dir.clone(),
            "/uploads",
            transcriber,
        ));

        let youtube_transcriber = TranscriptGenerator::new(config.provider.clone(), client.clone());
        let youtube_importer: Arc<dyn Importer> =
            Arc::new(YoutubeImporter::new(youtube_transcriber));

        let highlighter: Arc<dyn HighlightStrategy> = match &config.provider {
            Some(provider) => Arc::new(ModelHighlighter::new(provider.clone(), client)),
            None => Arc::new(KeywordHighlighter),
        };

        Self {
            file_importer,
            youtube_importer,
            highlighter,
        }
    }
}
