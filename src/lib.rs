pub mod analyzer;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod media;
pub mod model;
pub mod normalizer;
pub mod render;
pub mod request;
pub mod state;
pub mod wire;

use std::path::Path;

// Re-export main types
pub use crate::analyzer::{Analyzer, AnalyzerSettings};
pub use crate::builder::{AnalysisOutcome, InputSource, RecipeGenius, RecipeGeniusBuilder};
pub use crate::client::{GeminiClient, GenerativeBackend};
pub use crate::config::{AppConfig, GeminiConfig, MAX_VIDEO_BYTES};
pub use crate::error::{AnalyzerError, Result, GENERIC_ERROR_MESSAGE};
pub use crate::image::{build_thumbnail_prompt, decode_data_url, extract_inline_image};
pub use crate::media::{encode_video_file, EncodedVideo, VideoFile};
pub use crate::model::{AnalysisResult, Recipe, ShortsStrategy, VideoStrategy, VideoStructure};
pub use crate::normalizer::{
    extract_and_parse_loose_json, parse_strict_json, FencedJson, ResponseNormalizer, StrictJson,
};
pub use crate::request::{
    build_thumbnail_request, build_url_analysis_request, build_video_analysis_request,
};
pub use crate::state::{AppState, Session, Tab, ThumbnailState};

/// Analyze a video file with configuration from file and environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = recipe_genius::analyze_video_file("dinner.mp4").await?;
/// println!("{}", result.recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn analyze_video_file(path: impl AsRef<Path>) -> Result<AnalysisResult> {
    let config = AppConfig::load()?;
    let analyzer = Analyzer::from_config(&config)?;
    let video = VideoFile::from_path(path.as_ref(), None, config.max_video_bytes).await?;
    analyzer.analyze_video_file(&video).await
}

/// Analyze a video by URL with configuration from file and environment.
pub async fn analyze_video_url(url: &str) -> Result<AnalysisResult> {
    let config = AppConfig::load()?;
    Analyzer::from_config(&config)?.analyze_url(url).await
}

/// Generate a thumbnail and return it as a `data:` URL.
pub async fn generate_thumbnail(prompt: &str) -> Result<String> {
    let config = AppConfig::load()?;
    Analyzer::from_config(&config)?
        .generate_thumbnail(prompt)
        .await
}
