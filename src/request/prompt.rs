/// Instruction sent alongside an inline video.
///
/// The prompts are loaded from text files at compile time using the
/// `include_str!` macro, making them easy to edit without dealing with
/// Rust string syntax.
pub const VIDEO_ANALYSIS_PROMPT: &str = include_str!("video_analysis.txt");

/// System instruction for the schema-enforced video analysis.
pub const SYSTEM_INSTRUCTION: &str = include_str!("system_instruction.txt");

/// Prompt template for search-grounded URL analysis.
///
/// Contains a `{{URL}}` placeholder that is replaced by [`inject_url`].
/// Since schema enforcement is unavailable with the search tool, the expected
/// JSON shape is spelled out in the prompt itself.
pub const URL_ANALYSIS_PROMPT: &str = include_str!("url_analysis.txt");

/// Style suffix appended to every thumbnail prompt.
pub const THUMBNAIL_STYLE_SUFFIX: &str =
    " Photorealistic, 4k, high resolution, professional food photography, vibrant colors.";

/// Injects the video URL into the URL analysis prompt template.
pub fn inject_url(url: &str) -> String {
    URL_ANALYSIS_PROMPT.replace("{{URL}}", url.trim())
}
