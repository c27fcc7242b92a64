use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::analyzer::{Analyzer, AnalyzerSettings};
use crate::client::{GeminiClient, GenerativeBackend};
use crate::config::AppConfig;
use crate::error::{AnalyzerError, Result};
use crate::media::VideoFile;
use crate::model::AnalysisResult;
use crate::state::ThumbnailState;

/// Represents the input source for an analysis
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Read a video from disk
    VideoPath(PathBuf),
    /// Use an in-memory video
    Video(VideoFile),
    /// Look the video up by URL with search grounding
    Url(String),
}

/// Result of an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Thumbnail generation outcome; `Empty` unless requested
    pub thumbnail: ThumbnailState,
}

/// Builder for configuring and executing a video analysis
#[derive(Default)]
pub struct RecipeGeniusBuilder {
    source: Option<InputSource>,
    api_key: Option<String>,
    analysis_model: Option<String>,
    image_model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    with_thumbnail: bool,
    backend: Option<Arc<dyn GenerativeBackend>>,
}

impl RecipeGeniusBuilder {
    /// Set the input source to a video file on disk
    ///
    /// # Example
    /// ```
    /// use recipe_genius::RecipeGenius;
    ///
    /// let builder = RecipeGenius::builder()
    ///     .video_file("dinner.mp4");
    /// ```
    pub fn video_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::VideoPath(path.into()));
        self
    }

    /// Set the input source to an in-memory video
    pub fn video(mut self, video: VideoFile) -> Self {
        self.source = Some(InputSource::Video(video));
        self
    }

    /// Set the input source to a video URL
    ///
    /// # Example
    /// ```
    /// use recipe_genius::RecipeGenius;
    ///
    /// let builder = RecipeGenius::builder()
    ///     .url("https://youtube.com/watch?v=abc");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the Gemini API key instead of relying on config or environment
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model used for analysis
    pub fn analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = Some(model.into());
        self
    }

    /// Set the model used for thumbnail generation
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Point the Gemini client at a different host (proxy or test server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_genius::RecipeGenius;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeGenius::builder()
    ///     .url("https://youtube.com/watch?v=abc")
    ///     .timeout(Duration::from_secs(120));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Also generate a thumbnail from the analysis' thumbnail prompt
    pub fn with_thumbnail(mut self) -> Self {
        self.with_thumbnail = true;
        self
    }

    /// Use a custom backend instead of the Gemini REST client
    pub fn backend(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    fn into_analyzer(
        mut self,
        mut config: AppConfig,
    ) -> Result<(Analyzer, InputSource, bool)> {
        let source = self.source.take().ok_or_else(|| {
            AnalyzerError::BuilderError(
                "No input source specified. Use .video_file(), .video() or .url()".to_string(),
            )
        })?;

        if let Some(key) = self.api_key {
            config.gemini.api_key = Some(key);
        }
        if let Some(model) = self.analysis_model {
            config.gemini.analysis_model = model;
        }
        if let Some(model) = self.image_model {
            config.gemini.image_model = model;
        }
        if let Some(url) = self.base_url {
            config.gemini.base_url = url;
        }

        let settings = AnalyzerSettings::from(&config);
        let backend: Arc<dyn GenerativeBackend> = match self.backend {
            Some(backend) => backend,
            None => {
                let timeout = self
                    .timeout
                    .or_else(|| config.timeout_secs.map(Duration::from_secs));
                Arc::new(GeminiClient::new(&config.gemini, timeout)?)
            }
        };

        Ok((Analyzer::new(backend, settings), source, self.with_thumbnail))
    }

    /// Build and execute the analysis
    ///
    /// Configuration is loaded from `recipe-genius.toml` and the environment,
    /// then overridden by anything set on the builder.
    ///
    /// # Errors
    /// Returns `AnalyzerError` if:
    /// - No input source was specified
    /// - The video is not a video or is too large
    /// - The API call fails or the response cannot be parsed
    ///
    /// A failed thumbnail generation does not fail the analysis; it is
    /// reported through [`AnalysisOutcome::thumbnail`].
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_genius::RecipeGenius;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = RecipeGenius::builder()
    ///     .url("https://youtube.com/watch?v=abc")
    ///     .with_thumbnail()
    ///     .build()
    ///     .await?;
    /// println!("{}", outcome.result.recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<AnalysisOutcome> {
        let config = AppConfig::load()?;
        self.build_with_config(config).await
    }

    /// Like [`build`](Self::build) but with an explicit base configuration.
    pub async fn build_with_config(self, config: AppConfig) -> Result<AnalysisOutcome> {
        let (analyzer, source, with_thumbnail) = self.into_analyzer(config)?;

        let result = match source {
            InputSource::VideoPath(path) => {
                let max_bytes = analyzer.settings().max_video_bytes;
                let video = VideoFile::from_path(&path, None, max_bytes).await?;
                analyzer.analyze_video_file(&video).await?
            }
            InputSource::Video(video) => analyzer.analyze_video_file(&video).await?,
            InputSource::Url(url) => analyzer.analyze_url(&url).await?,
        };

        let mut thumbnail = ThumbnailState::default();
        if with_thumbnail {
            thumbnail.begin()?;
            let generated = analyzer.generate_thumbnail(&result.thumbnail_prompt).await;
            if let Err(e) = &generated {
                warn!("Thumbnail generation failed: {}", e);
            }
            thumbnail.settle(generated);
        }

        Ok(AnalysisOutcome { result, thumbnail })
    }
}

/// Main entry point for the builder API
pub struct RecipeGenius;

impl RecipeGenius {
    /// Creates a new builder for analyzing cooking videos
    ///
    /// # Example
    /// ```
    /// use recipe_genius::RecipeGenius;
    ///
    /// let builder = RecipeGenius::builder();
    /// ```
    pub fn builder() -> RecipeGeniusBuilder {
        RecipeGeniusBuilder::default()
    }
}
