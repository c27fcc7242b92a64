mod prompt;
mod schema;

pub use prompt::{
    inject_url, SYSTEM_INSTRUCTION, THUMBNAIL_STYLE_SUFFIX, URL_ANALYSIS_PROMPT,
    VIDEO_ANALYSIS_PROMPT,
};
pub use schema::analysis_schema;

use crate::image::build_thumbnail_prompt;
use crate::media::EncodedVideo;
use crate::wire::{Content, GenerateContentRequest, GenerationConfig, Part, Tool};

/// Build the schema-enforced request for an inline video.
///
/// The video part comes first, followed by the instruction text.
pub fn build_video_analysis_request(video: &EncodedVideo) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![
            Part::inline(video.mime_type.clone(), video.data.clone()),
            Part::text(VIDEO_ANALYSIS_PROMPT.trim()),
        ])],
        system_instruction: Some(Content::unattributed(vec![Part::text(
            SYSTEM_INSTRUCTION.trim(),
        )])),
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_schema()),
            temperature: None,
        }),
        tools: Vec::new(),
    }
}

/// Build the search-grounded request for a video URL.
///
/// The Gemini API refuses a response schema or JSON MIME type when the
/// search tool is attached, so the shape is only described in the prompt.
pub fn build_url_analysis_request(url: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text(inject_url(url))])],
        system_instruction: None,
        generation_config: None,
        tools: vec![Tool::google_search()],
    }
}

/// Build the image-generation request for a thumbnail.
pub fn build_thumbnail_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::text(build_thumbnail_prompt(
            prompt,
        ))])],
        ..Default::default()
    }
}
