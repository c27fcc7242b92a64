use log::{debug, error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::{GeminiClient, GenerativeBackend};
use crate::config::AppConfig;
use crate::error::{AnalyzerError, Result};
use crate::image::extract_inline_image;
use crate::media::{encode_video_file, EncodedVideo, VideoFile};
use crate::model::AnalysisResult;
use crate::normalizer::normalizer_for;
use crate::request::{
    build_thumbnail_request, build_url_analysis_request, build_video_analysis_request,
};
use crate::wire::GenerateContentRequest;

/// Model and validation settings for an [`Analyzer`]
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub analysis_model: String,
    pub image_model: String,
    pub temperature: Option<f32>,
    pub max_video_bytes: u64,
    pub validate_results: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        AnalyzerSettings::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalyzerSettings {
    fn from(config: &AppConfig) -> Self {
        AnalyzerSettings {
            analysis_model: config.gemini.analysis_model.clone(),
            image_model: config.gemini.image_model.clone(),
            temperature: config.gemini.temperature,
            max_video_bytes: config.max_video_bytes,
            validate_results: config.validate_results,
        }
    }
}

/// Drives request building, the backend call and response normalization
/// for each user action.
pub struct Analyzer {
    backend: Arc<dyn GenerativeBackend>,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn GenerativeBackend>, settings: AnalyzerSettings) -> Self {
        Analyzer { backend, settings }
    }

    /// Create an analyzer backed by the Gemini REST API
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let client = GeminiClient::new(&config.gemini, timeout)?;
        Ok(Analyzer::new(Arc::new(client), AnalyzerSettings::from(config)))
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Validate, encode and analyze a video file.
    pub async fn analyze_video_file(&self, file: &VideoFile) -> Result<AnalysisResult> {
        let encoded = encode_video_file(file, self.settings.max_video_bytes)?;
        info!(
            "Analyzing video '{}' ({}, {} bytes)",
            file.name,
            file.mime_type,
            file.size()
        );
        self.analyze_video(&encoded).await
    }

    /// Analyze an already encoded video with schema-enforced output.
    pub async fn analyze_video(&self, video: &EncodedVideo) -> Result<AnalysisResult> {
        let request = build_video_analysis_request(video);
        self.run_analysis(request).await.map_err(|e| {
            error!("Error analyzing video: {}", e);
            e
        })
    }

    /// Analyze a video by URL using search-grounded generation.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult> {
        if url.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "Video URL cannot be empty".to_string(),
            ));
        }

        info!("Analyzing video URL {}", url.trim());
        let request = build_url_analysis_request(url);
        self.run_analysis(request).await.map_err(|e| {
            error!("Error analyzing video URL: {}", e);
            e
        })
    }

    /// Generate a thumbnail image and return it as a `data:` URL.
    pub async fn generate_thumbnail(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "Thumbnail prompt cannot be empty".to_string(),
            ));
        }

        let request = build_thumbnail_request(prompt).with_temperature(self.settings.temperature);
        let start = Instant::now();
        let response = self
            .backend
            .generate_content(&self.settings.image_model, &request)
            .await
            .map_err(|e| {
                error!("Error generating thumbnail: {}", e);
                e
            })?;
        debug!(
            "Thumbnail response from {} in {:?}",
            self.backend.name(),
            start.elapsed()
        );

        extract_inline_image(response.parts()).map_err(|e| {
            error!("Error generating thumbnail: {}", e);
            e
        })
    }

    async fn run_analysis(&self, request: GenerateContentRequest) -> Result<AnalysisResult> {
        let normalizer = normalizer_for(&request);
        let request = request.with_temperature(self.settings.temperature);

        let start = Instant::now();
        let response = self
            .backend
            .generate_content(&self.settings.analysis_model, &request)
            .await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let text = response.text();
        debug!(
            "{} answered in {}ms with {} chars; normalizing with {}",
            self.backend.name(),
            latency_ms,
            text.len(),
            normalizer.name()
        );

        let result = normalizer.normalize(&text)?;
        if self.settings.validate_results {
            result.validate()?;
        }

        info!("Analysis complete: '{}'", result.recipe.title);
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeBackend;
    use super::*;
    use crate::model::fixtures::sample_result;
    use crate::wire::Part;

    fn analyzer(backend: Arc<FakeBackend>) -> Analyzer {
        Analyzer::new(backend, AnalyzerSettings::default())
    }

    fn sample_json() -> String {
        serde_json::to_string(&sample_result()).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_video_uses_analysis_model_and_schema() {
        let backend = Arc::new(FakeBackend::with_text(&sample_json()));
        let file = VideoFile::new("clip.mp4", "video/mp4", vec![1, 2, 3]);

        let result = analyzer(backend.clone())
            .analyze_video_file(&file)
            .await
            .unwrap();
        assert_eq!(result, sample_result());

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "gemini-2.5-flash");
        assert!(calls[0].1.has_response_schema());
    }

    #[tokio::test]
    async fn test_analyze_video_rejects_before_calling_backend() {
        let backend = Arc::new(FakeBackend::with_text(&sample_json()));
        let file = VideoFile::new("photo.png", "image/png", vec![1, 2, 3]);

        let result = analyzer(backend.clone()).analyze_video_file(&file).await;
        assert!(matches!(result, Err(AnalyzerError::UnsupportedType(_))));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_url_unwraps_fenced_json() {
        let fenced = format!("```json\n{}\n```", sample_json());
        let backend = Arc::new(FakeBackend::with_text(&fenced));

        let result = analyzer(backend.clone())
            .analyze_url("https://youtube.com/watch?v=abc")
            .await
            .unwrap();
        assert_eq!(result, sample_result());
        assert!(backend.calls.lock().unwrap()[0].1.uses_search());
    }

    #[tokio::test]
    async fn test_analyze_url_rejects_blank_url() {
        let backend = Arc::new(FakeBackend::with_text(&sample_json()));
        let result = analyzer(backend.clone()).analyze_url("   ").await;
        assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_model_text_is_parse_error() {
        let backend = Arc::new(FakeBackend::with_parts(Vec::new()));
        let result = analyzer(backend)
            .analyze_url("https://youtube.com/watch?v=abc")
            .await;
        assert!(matches!(result, Err(AnalyzerError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_validation_can_be_disabled() {
        let mut empty = sample_result();
        empty.recipe.steps.clear();
        let json = serde_json::to_string(&empty).unwrap();

        let backend = Arc::new(FakeBackend::with_text(&json));
        let strict = analyzer(backend.clone())
            .analyze_url("https://youtu.be/abc")
            .await;
        assert!(matches!(strict, Err(AnalyzerError::ValidationError(_))));

        let settings = AnalyzerSettings {
            validate_results: false,
            ..Default::default()
        };
        let lenient = Analyzer::new(backend, settings)
            .analyze_url("https://youtu.be/abc")
            .await
            .unwrap();
        assert!(lenient.recipe.steps.is_empty());
    }

    #[tokio::test]
    async fn test_temperature_is_forwarded() {
        let backend = Arc::new(FakeBackend::with_text(&sample_json()));
        let settings = AnalyzerSettings {
            temperature: Some(0.2),
            ..Default::default()
        };
        Analyzer::new(backend.clone(), settings)
            .analyze_url("https://youtu.be/abc")
            .await
            .unwrap();

        let calls = backend.calls.lock().unwrap();
        let config = calls[0].1.generation_config.as_ref().unwrap();
        assert_eq!(config.temperature, Some(0.2));
        assert!(config.response_schema.is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = Arc::new(FakeBackend::failing());
        let result = analyzer(backend).analyze_url("https://youtu.be/abc").await;
        assert!(matches!(result, Err(AnalyzerError::ApiError { code: 500, .. })));
    }

    #[tokio::test]
    async fn test_generate_thumbnail() {
        let backend = Arc::new(FakeBackend::with_parts(vec![
            Part::text("Here is your image"),
            Part::inline("image/png", "iVBORw0KGgo="),
        ]));

        let url = analyzer(backend.clone())
            .generate_thumbnail("Golden pancakes")
            .await
            .unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw0KGgo=");

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].0, "gemini-2.5-flash-image");
        let text = calls[0].1.contents[0].parts[0].text.clone().unwrap();
        assert!(text.starts_with("Golden pancakes Photorealistic"));
    }

    #[tokio::test]
    async fn test_generate_thumbnail_without_image() {
        let backend = Arc::new(FakeBackend::with_text("I can't draw that"));
        let result = analyzer(backend).generate_thumbnail("Golden pancakes").await;
        assert!(matches!(result, Err(AnalyzerError::ImageNotFound)));
    }
}
