use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AnalyzerError, Result};
use crate::model::AnalysisResult;
use crate::wire::GenerateContentRequest;

/// Fence patterns tried in order: a block tagged `json`, then an untagged block.
const FENCE_PATTERNS: [&str; 2] = [r"(?s)```json\n(.*?)\n```", r"(?s)```\n(.*?)\n```"];

/// Turns model text into an [`AnalysisResult`]
pub trait ResponseNormalizer: Send + Sync {
    fn name(&self) -> &str;

    fn normalize(&self, text: &str) -> Result<AnalysisResult>;
}

/// For schema-enforced responses, which are plain JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictJson;

/// For search-grounded responses, which may wrap the JSON in a markdown fence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FencedJson;

impl ResponseNormalizer for StrictJson {
    fn name(&self) -> &str {
        "strict_json"
    }

    fn normalize(&self, text: &str) -> Result<AnalysisResult> {
        parse_strict_json(text)
    }
}

impl ResponseNormalizer for FencedJson {
    fn name(&self) -> &str {
        "fenced_json"
    }

    fn normalize(&self, text: &str) -> Result<AnalysisResult> {
        extract_and_parse_loose_json(text)
    }
}

/// Pick the normalizer matching how a request was made.
pub fn normalizer_for(request: &GenerateContentRequest) -> Box<dyn ResponseNormalizer> {
    if request.has_response_schema() {
        Box::new(StrictJson)
    } else {
        Box::new(FencedJson)
    }
}

/// Parse model text that is expected to be bare JSON.
pub fn parse_strict_json(text: &str) -> Result<AnalysisResult> {
    if text.trim().is_empty() {
        return Err(AnalyzerError::ParseError(
            "No response from model".to_string(),
        ));
    }

    serde_json::from_str(text).map_err(|e| AnalyzerError::ParseError(e.to_string()))
}

fn fence_regexes() -> &'static [Regex] {
    static FENCES: OnceLock<Vec<Regex>> = OnceLock::new();
    FENCES.get_or_init(|| {
        FENCE_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Return the interior of the first fenced code block, or the whole text.
pub fn strip_code_fence(text: &str) -> &str {
    for re in fence_regexes() {
        if let Some(inner) = re.captures(text).and_then(|c| c.get(1)) {
            debug!("Stripped markdown fence ({} chars inside)", inner.len());
            return inner.as_str();
        }
    }
    text
}

/// Parse model text that may be wrapped in a markdown code fence.
pub fn extract_and_parse_loose_json(text: &str) -> Result<AnalysisResult> {
    if text.trim().is_empty() {
        return Err(AnalyzerError::ParseError(
            "No response from model".to_string(),
        ));
    }

    parse_strict_json(strip_code_fence(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_result;
    use crate::request::{build_url_analysis_request, build_video_analysis_request};
    use crate::media::EncodedVideo;

    #[test]
    fn test_fence_patterns_compile_once() {
        assert_eq!(fence_regexes().len(), FENCE_PATTERNS.len());
        assert!(std::ptr::eq(fence_regexes(), fence_regexes()));
    }

    fn sample_json() -> String {
        serde_json::to_string_pretty(&sample_result()).unwrap()
    }

    #[test]
    fn test_parse_strict_json_round_trip() {
        let parsed = parse_strict_json(&sample_json()).unwrap();
        assert_eq!(parsed, sample_result());
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(matches!(
            parse_strict_json(""),
            Err(AnalyzerError::ParseError(_))
        ));
        assert!(matches!(
            extract_and_parse_loose_json(""),
            Err(AnalyzerError::ParseError(_))
        ));
        assert!(matches!(
            extract_and_parse_loose_json("  \n "),
            Err(AnalyzerError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_strict_json("{\"recipe\": "),
            Err(AnalyzerError::ParseError(_))
        ));
        assert!(matches!(
            extract_and_parse_loose_json("Sorry, I couldn't find that video."),
            Err(AnalyzerError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_missing_required_key() {
        let mut value = serde_json::to_value(sample_result()).unwrap();
        value.as_object_mut().unwrap().remove("thumbnailPrompt");
        let result = parse_strict_json(&value.to_string());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("thumbnailPrompt"));
    }

    #[test]
    fn test_fenced_json_matches_unwrapped() {
        let inner = sample_json();
        let fenced = format!("Here you go:\n```json\n{}\n```\nEnjoy!", inner);

        assert_eq!(
            extract_and_parse_loose_json(&fenced).unwrap(),
            parse_strict_json(&inner).unwrap()
        );
    }

    #[test]
    fn test_untagged_fence() {
        let inner = sample_json();
        let fenced = format!("```\n{}\n```", inner);
        assert_eq!(strip_code_fence(&fenced), inner);
        assert_eq!(extract_and_parse_loose_json(&fenced).unwrap(), sample_result());
    }

    #[test]
    fn test_unfenced_text_is_used_whole() {
        let inner = sample_json();
        assert_eq!(strip_code_fence(&inner), inner);
        assert_eq!(extract_and_parse_loose_json(&inner).unwrap(), sample_result());
    }

    #[test]
    fn test_tagged_fence_preferred_over_untagged() {
        let text = "```\nnot json\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_normalizer_for_request_kind() {
        let video = EncodedVideo {
            data: "AAAA".to_string(),
            mime_type: "video/mp4".to_string(),
        };
        assert_eq!(
            normalizer_for(&build_video_analysis_request(&video)).name(),
            "strict_json"
        );
        assert_eq!(
            normalizer_for(&build_url_analysis_request("https://youtu.be/abc")).name(),
            "fenced_json"
        );
    }

    #[test]
    fn test_strict_normalizer_does_not_unwrap_fences() {
        let fenced = format!("```json\n{}\n```", sample_json());
        assert!(StrictJson.normalize(&fenced).is_err());
        assert!(FencedJson.normalize(&fenced).is_ok());
    }
}
