use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::error::{AnalyzerError, Result};
use crate::media::to_data_url;
use crate::request::THUMBNAIL_STYLE_SUFFIX;
use crate::wire::Part;

/// Append the photographic style suffix to a thumbnail prompt.
pub fn build_thumbnail_prompt(base_prompt: &str) -> String {
    format!("{}{}", base_prompt, THUMBNAIL_STYLE_SUFFIX)
}

/// Return the first inline image in `parts` as a `data:` URL.
pub fn extract_inline_image(parts: &[Part]) -> Result<String> {
    parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| {
            debug!(
                "Found inline image ({}, {} base64 chars)",
                inline.mime_type,
                inline.data.len()
            );
            to_data_url(&inline.mime_type, &inline.data)
        })
        .ok_or(AnalyzerError::ImageNotFound)
}

/// Split a base64 `data:` URL into its media type and decoded bytes.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AnalyzerError::ParseError("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AnalyzerError::ParseError("data URL has no payload".to_string()))?;
    let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
        AnalyzerError::ParseError("only base64 data URLs are supported".to_string())
    })?;

    let bytes = STANDARD.decode(payload)?;
    Ok((mime_type.to_string(), bytes))
}

/// File extension matching an image media type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}
