use thiserror::Error;

/// Message shown to the user whenever a remote analysis fails.
///
/// Transport failures, malformed responses and quota errors all collapse into
/// this single message; the underlying error is only logged.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Oops! Something went wrong analyzing the video. Please check the URL or try a shorter clip.";

/// Errors that can occur while analyzing a cooking video
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Declared media type is not a video
    #[error("Unsupported media type '{0}': please upload a valid video file")]
    UnsupportedType(String),

    /// Video exceeds the configured upload ceiling
    #[error("Video is {size} bytes, which exceeds the {max} byte limit; please use a smaller clip")]
    FileTooLarge { size: u64, max: u64 },

    /// Model text could not be parsed into an analysis result
    #[error("Failed to parse model response: {0}")]
    ParseError(String),

    /// Parsed result is missing content a successful analysis must have
    #[error("Model response failed validation: {0}")]
    ValidationError(String),

    /// Image generation response carried no inline image part
    #[error("No image generated")]
    ImageNotFound,

    /// Transport-level failure talking to the generative API
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The generative API answered with an error payload
    #[error("Gemini API error ({code}): {message}")]
    ApiError { code: i64, message: String },

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An analysis is already in flight
    #[error("An analysis is already in progress")]
    Busy,

    /// No API key in config or environment
    #[error("GEMINI_API_KEY not found in config or environment")]
    MissingApiKey,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read or write a local file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Inline payload was not valid base64
    #[error("Base64 decode error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl AnalyzerError {
    /// Whether the error comes from checking the user's input locally rather
    /// than from the remote service. Local errors are shown verbatim.
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self,
            AnalyzerError::UnsupportedType(_)
                | AnalyzerError::FileTooLarge { .. }
                | AnalyzerError::InvalidInput(_)
        )
    }

    /// Text to surface to the user for this error.
    pub fn user_message(&self) -> String {
        if self.is_local_validation() {
            self.to_string()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
