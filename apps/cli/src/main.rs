use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use clipsynth_core::{
    FileImporter, HighlightStrategy, ImportSession, ImportSource, Importer, KeywordHighlighter,
    MockImporter, ModelHighlighter, Provider, TranscriptGenerator, UploadStatus, VideoDetails,
    YoutubeImporter, format_timestamp, format_transcript, run_import,
};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, ValueEnum)]
enum CliProvider {
    Grok,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "clipsynth")]
#[command(about = "Import a video file or YouTube URL, get a transcript, and find hook segments")]
struct Cli {
    /// A local video file path or a YouTube URL
    source: String,

    /// Find hook-worthy segments and mark them in the transcript
    #[arg(long)]
    find_hooks: bool,

    /// AI provider for model-backed transcripts and highlights
    #[arg(short, long)]
    provider: Option<CliProvider>,

    /// Use the deterministic mock importer (no network, no external tools)
    #[arg(long)]
    mock: bool,

    /// Abort the import after this many seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

fn uploads_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("clipsynth")
        .join("uploads")
}

fn parse_source(raw: &str) -> ImportSource {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        ImportSource::Youtube {
            url: raw.to_string(),
        }
    } else {
        let path = PathBuf::from(raw);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| raw.to_string());
        ImportSource::File { path, name }
    }
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/dim} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("uploading");
    pb
}

fn print_details(details: &VideoDetails, highlight_ids: &[String]) {
    println!(
        "\n{} {} {}",
        style("✓").green().bold(),
        style(&details.name).bold(),
        style(format!(
            "[{} · {}]",
            format_timestamp(details.duration),
            details.source.kind()
        ))
        .dim()
    );
    if let clipsynth_core::VideoSource::Upload {
        video_url: Some(url),
    } = &details.source
    {
        println!("{} {}", style("Playable:").dim(), style(url).cyan());
    }
    println!("{} {}\n", style("Thumbnail:").dim(), details.thumbnail_url);

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_transcript(&details.transcript, highlight_ids));
    println!("{}", style("─".repeat(60)).dim());

    if !highlight_ids.is_empty() {
        println!(
            "\n{} {} hook segment(s) found",
            style("★").yellow().bold(),
            highlight_ids.len()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let provider: Option<Provider> = cli.provider.map(Into::into);

    // Validate API key early
    if let Some(p) = &provider {
        if let Err(e) = p.validate_api_key() {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }

    println!(
        "\n{}  {}\n",
        style("clipsynth").cyan().bold(),
        style("Video Importer").dim()
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let transcriber = TranscriptGenerator::new(provider.clone(), client.clone());

    let source = parse_source(&cli.source);
    let importer: Box<dyn Importer> = if cli.mock {
        Box::new(MockImporter::default())
    } else {
        match &source {
            ImportSource::File { path, .. } => {
                if !path.exists() {
                    eprintln!(
                        "{} file not found: {}",
                        style("Error:").red().bold(),
                        path.display()
                    );
                    std::process::exit(1);
                }
                Box::new(FileImporter::new(uploads_dir(), "/uploads", transcriber))
            }
            ImportSource::Youtube { .. } => Box::new(YoutubeImporter::new(transcriber)),
        }
    };

    let session = Arc::new(Mutex::new(ImportSession::new()));
    let pb = create_progress_bar();
    let bar = pb.clone();

    let status = run_import(
        &session,
        importer.as_ref(),
        source,
        Duration::from_secs(cli.timeout_secs),
        move |pct| {
            bar.set_position(pct as u64);
            if pct == 100 {
                bar.set_message("processing");
            }
        },
    )
    .await;
    pb.finish_and_clear();

    let (error, details) = {
        let session = session.lock().unwrap();
        (
            session.error().map(str::to_string),
            session.result().cloned(),
        )
    };

    match (status, details) {
        (UploadStatus::Success, Some(details)) => {
            let highlight_ids = if cli.find_hooks {
                let strategy: Box<dyn HighlightStrategy> = match provider {
                    Some(p) => Box::new(ModelHighlighter::new(p, client)),
                    None => Box::new(KeywordHighlighter),
                };
                strategy.find_highlights(&details.transcript).await
            } else {
                Vec::new()
            };
            print_details(&details, &highlight_ids);
            Ok(())
        }
        _ => {
            eprintln!(
                "{} {}",
                style("Import failed:").red().bold(),
                error.as_deref().unwrap_or("unknown error")
            );
            std::process::exit(1);
        }
    }
}
