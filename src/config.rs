use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Largest video accepted for inline upload (50 MiB).
pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Gemini API settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Upload ceiling for video files, in bytes
    #[serde(default = "default_max_video_bytes")]
    pub max_video_bytes: u64,
    /// Optional request timeout in seconds; requests never time out when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Reject parsed results that have no ingredients or steps
    #[serde(default = "default_validate_results")]
    pub validate_results: bool,
}

/// Configuration for the Gemini generative API
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for video and URL analysis
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,
    /// Model used for thumbnail generation
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Temperature for generation (0.0-2.0); the service default applies when unset
    pub temperature: Option<f32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            max_video_bytes: default_max_video_bytes(),
            timeout_secs: None,
            validate_results: default_validate_results(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            analysis_model: default_analysis_model(),
            image_model: default_image_model(),
            temperature: None,
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_analysis_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_max_video_bytes() -> u64 {
    MAX_VIDEO_BYTES
}

fn default_validate_results() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_GENIUS__ prefix
    /// 2. recipe-genius.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_GENIUS__GEMINI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-genius").required(false))
        // Use double underscore for nested: RECIPE_GENIUS__GEMINI__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_GENIUS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
