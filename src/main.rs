use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use recipe_genius::image::extension_for_mime;
use recipe_genius::render::render_tab;
use recipe_genius::{
    decode_data_url, AnalysisResult, Analyzer, AnalyzerError, AppConfig, AppState, Session, Tab,
    ThumbnailState, VideoFile,
};

#[derive(Parser)]
#[command(name = "recipe-genius")]
#[command(version)]
#[command(about = "Turn cooking videos into recipes, viral scripts and thumbnails")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the analysis as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Result tab to show
    #[arg(long, global = true, value_enum, default_value = "all")]
    tab: TabArg,

    /// Generate a thumbnail after a successful analysis and save it here
    #[arg(long, global = true)]
    thumbnail_out: Option<PathBuf>,
}

/// `--tab` values; `all` prints every tab in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TabArg {
    Recipe,
    Strategy,
    Thumbnail,
    All,
}

impl TabArg {
    fn tabs(self) -> Vec<Tab> {
        match self {
            TabArg::Recipe => vec![Tab::Recipe],
            TabArg::Strategy => vec![Tab::Strategy],
            TabArg::Thumbnail => vec![Tab::Thumbnail],
            TabArg::All => vec![Tab::Recipe, Tab::Strategy, Tab::Thumbnail],
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a local video file
    Video {
        /// Path to the video
        path: PathBuf,
        /// Override the media type guessed from the file extension
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Analyze a video by URL (e.g. a YouTube link) using search grounding
    Url {
        /// Video URL
        url: String,
    },
    /// Generate a thumbnail image from a prompt
    Thumbnail {
        /// Description of the dish
        prompt: String,
        /// Where to write the image
        #[arg(short, long, default_value = "thumbnail.png")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = AppConfig::load()?;
    let analyzer = Analyzer::from_config(&config)?;
    debug!("Using models {:?}", analyzer.settings());

    let mut session = Session::new();
    session.begin()?;

    let outcome = match cli.command {
        Commands::Video { path, mime_type } => {
            let max_bytes = analyzer.settings().max_video_bytes;
            match VideoFile::from_path(&path, mime_type.as_deref(), max_bytes).await {
                Ok(video) => analyzer.analyze_video_file(&video).await,
                Err(e) if e.is_local_validation() => Err(e),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Url { url } => analyzer.analyze_url(&url).await,
        Commands::Thumbnail { prompt, output } => {
            let mut thumbnail = ThumbnailState::default();
            thumbnail.begin()?;
            thumbnail.settle(analyzer.generate_thumbnail(&prompt).await);
            let saved = finish_thumbnail(&thumbnail, &output).await?;
            return Ok(if saved {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
    };

    // Local validation failures are reported as-is, like a blocking alert
    if let Err(e) = &outcome {
        if e.is_local_validation() {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    }

    session.settle(outcome);
    let result = match session.state() {
        AppState::Success(result) => result.clone(),
        AppState::Error(message) => {
            eprintln!("{}", message);
            return Ok(ExitCode::FAILURE);
        }
        AppState::Idle | AppState::Analyzing => return Ok(ExitCode::FAILURE),
    };

    let mut thumbnail = ThumbnailState::default();
    if let Some(output) = &cli.thumbnail_out {
        thumbnail.begin()?;
        thumbnail.settle(analyzer.generate_thumbnail(&result.thumbnail_prompt).await);
        if !finish_thumbnail(&thumbnail, output).await? {
            info!("Analysis succeeded but thumbnail generation failed");
        }
    }

    print_result(&result, cli.json, cli.tab, &thumbnail)?;
    Ok(ExitCode::SUCCESS)
}

fn print_result(
    result: &AnalysisResult,
    json: bool,
    tab: TabArg,
    thumbnail: &ThumbnailState,
) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    for tab in tab.tabs() {
        println!("{}", render_tab(result, tab, thumbnail));
    }
    Ok(())
}

async fn finish_thumbnail(
    thumbnail: &ThumbnailState,
    output: &Path,
) -> Result<bool, Box<dyn Error>> {
    match thumbnail {
        ThumbnailState::Ready(data_url) => {
            let (mime_type, bytes) = decode_data_url(data_url)?;
            let output = match output.extension() {
                Some(_) => output.to_path_buf(),
                None => output.with_extension(extension_for_mime(&mime_type)),
            };
            tokio::fs::write(&output, &bytes)
                .await
                .map_err(AnalyzerError::from)?;
            eprintln!(
                "Saved {} thumbnail ({} bytes) to {}",
                mime_type,
                bytes.len(),
                output.display()
            );
            Ok(true)
        }
        ThumbnailState::Failed(message) => {
            eprintln!("{}", message);
            Ok(false)
        }
        ThumbnailState::Empty | ThumbnailState::Generating => Ok(false),
    }
}
