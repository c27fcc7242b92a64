use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{AnalyzerError, Result};
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Environment variables checked for an API key when none is configured.
const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// A service that answers `generateContent` calls.
///
/// Passed explicitly to the analyzer so tests can substitute a fake.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Get the backend name (e.g., "gemini")
    fn name(&self) -> &str;

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn new(config: &GeminiConfig, timeout: Option<Duration>) -> Result<Self> {
        // Try config first, then fall back to environment variables
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                API_KEY_VARS
                    .iter()
                    .find_map(|var| std::env::var(var).ok().filter(|k| !k.is_empty()))
            })
            .ok_or(AnalyzerError::MissingApiKey)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GeminiClient {
            client: builder.build()?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        )
    }
}

/// One-line description of a response for logging; payloads are left out.
fn response_summary(response: &GenerateContentResponse) -> String {
    let usage = response
        .usage_metadata
        .as_ref()
        .map(|u| {
            format!(
                "{} prompt / {} candidate tokens",
                u.prompt_token_count.unwrap_or(0),
                u.candidates_token_count.unwrap_or(0)
            )
        })
        .unwrap_or_else(|| "no usage".to_string());

    format!(
        "Gemini response: {} candidate(s), {} part(s), {}",
        response.candidates.len(),
        response.parts().len(),
        usage
    )
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let response_body: Option<Value> = serde_json::from_str(&body).ok();

        // Check for API error response
        if let Some(error) = response_body.as_ref().and_then(|b| b.get("error")) {
            let code = error["code"].as_i64().unwrap_or(status.as_u16() as i64);
            let message = error["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string();
            warn!("Gemini API error ({}): {}", code, message);
            return Err(AnalyzerError::ApiError { code, message });
        }

        if !status.is_success() {
            return Err(AnalyzerError::ApiError {
                code: status.as_u16() as i64,
                message: body,
            });
        }

        let response_body = response_body.ok_or_else(|| {
            AnalyzerError::ParseError("Gemini response body is not JSON".to_string())
        })?;
        let parsed: GenerateContentResponse =
            serde_json::from_value(response_body).map_err(|e| {
                AnalyzerError::ParseError(format!("Unexpected Gemini response shape: {}", e))
            })?;
        debug!("{}", response_summary(&parsed));

        Ok(parsed)
    }
}
