use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::path::Path;

use crate::error::{AnalyzerError, Result};

/// A video selected by the user, with its declared media type
#[derive(Debug, Clone)]
pub struct VideoFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Video payload ready to be sent inline to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedVideo {
    /// Base64 content without any data-URL prefix
    pub data: String,
    pub mime_type: String,
}

impl VideoFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        VideoFile {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a video from disk.
    ///
    /// The media type comes from `mime_type` when given, otherwise from the
    /// file extension. Type and size are checked against the file metadata
    /// before any bytes are read.
    pub async fn from_path(path: &Path, mime_type: Option<&str>, max_bytes: u64) -> Result<Self> {
        let mime_type = mime_type
            .unwrap_or_else(|| mime_type_for_path(path))
            .to_string();
        let size = tokio::fs::metadata(path).await?.len();
        check_video(&mime_type, size, max_bytes)?;

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Read {} ({}, {} bytes)", name, mime_type, bytes.len());

        Ok(VideoFile {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Guess the media type of a file from its extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4") => "video/mp4",
        Some("m4v") => "video/x-m4v",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mpeg") | Some("mpg") => "video/mpeg",
        Some("3gp") => "video/3gpp",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Build a `data:` URL for a base64 payload.
pub fn to_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Reject anything that is not a video, then anything over `max_bytes`.
fn check_video(mime_type: &str, size: u64, max_bytes: u64) -> Result<()> {
    if !mime_type.starts_with("video/") {
        return Err(AnalyzerError::UnsupportedType(mime_type.to_string()));
    }

    if size > max_bytes {
        return Err(AnalyzerError::FileTooLarge {
            size,
            max: max_bytes,
        });
    }
    Ok(())
}

/// Validate a video and encode it for inline upload.
///
/// The media type is checked before the size, so a large image is reported
/// as the wrong type rather than as too large.
pub fn encode_video_file(file: &VideoFile, max_bytes: u64) -> Result<EncodedVideo> {
    check_video(&file.mime_type, file.size(), max_bytes)?;

    let data_url = to_data_url(&file.mime_type, &STANDARD.encode(&file.bytes));
    let data = data_url
        .split_once(',')
        .map(|(_, content)| content.to_string())
        .unwrap_or_default();

    Ok(EncodedVideo {
        data,
        mime_type: file.mime_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_VIDEO_BYTES;

    const MIB: usize = 1024 * 1024;

    #[test]
    fn test_rejects_non_video_type() {
        let file = VideoFile::new("photo.png", "image/png", vec![0u8; 16]);
        let result = encode_video_file(&file, MAX_VIDEO_BYTES);
        assert!(matches!(result, Err(AnalyzerError::UnsupportedType(t)) if t == "image/png"));
    }

    #[test]
    fn test_rejects_oversized_video() {
        let file = VideoFile::new("long.mp4", "video/mp4", vec![0u8; 60 * MIB]);
        let result = encode_video_file(&file, MAX_VIDEO_BYTES);
        assert!(matches!(
            result,
            Err(AnalyzerError::FileTooLarge { size, max })
                if size == (60 * MIB) as u64 && max == MAX_VIDEO_BYTES
        ));
    }

    #[test]
    fn test_accepts_video_at_limit() {
        let file = VideoFile::new("edge.mp4", "video/mp4", vec![1u8; 50 * MIB]);
        assert!(encode_video_file(&file, MAX_VIDEO_BYTES).is_ok());
    }

    #[test]
    fn test_encodes_ten_mib_mp4() {
        let file = VideoFile::new("clip.mp4", "video/mp4", vec![7u8; 10 * MIB]);
        let encoded = encode_video_file(&file, MAX_VIDEO_BYTES).unwrap();

        assert_eq!(encoded.mime_type, "video/mp4");
        assert!(!encoded.data.is_empty());
        assert!(!encoded.data.starts_with("data:"));
        assert_eq!(STANDARD.decode(&encoded.data).unwrap().len(), 10 * MIB);
    }

    #[test]
    fn test_type_checked_before_size() {
        let file = VideoFile::new("huge.png", "image/png", vec![0u8; 60 * MIB]);
        assert!(matches!(
            encode_video_file(&file, MAX_VIDEO_BYTES),
            Err(AnalyzerError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("a/b/clip.MP4")), "video/mp4");
        assert_eq!(mime_type_for_path(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(mime_type_for_path(Path::new("clip.webm")), "video/webm");
        assert_eq!(mime_type_for_path(Path::new("photo.png")), "image/png");
        assert_eq!(
            mime_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dinner.webm");
        tokio::fs::write(&path, b"fake video bytes").await.unwrap();

        let file = VideoFile::from_path(&path, None, MAX_VIDEO_BYTES).await.unwrap();
        assert_eq!(file.name, "dinner.webm");
        assert_eq!(file.mime_type, "video/webm");
        assert_eq!(file.bytes, b"fake video bytes");
    }

    #[tokio::test]
    async fn test_from_path_mime_type_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recording");
        tokio::fs::write(&path, b"fake video bytes").await.unwrap();

        let file = VideoFile::from_path(&path, Some("video/mp4"), MAX_VIDEO_BYTES)
            .await
            .unwrap();
        assert_eq!(file.mime_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result =
            VideoFile::from_path(Path::new("/definitely/not/here.mp4"), None, MAX_VIDEO_BYTES)
                .await;
        assert!(matches!(result, Err(AnalyzerError::Io(_))));
    }

    /// Sparse file with a large apparent size but no data blocks.
    fn sparse_file(dir: &tempfile::TempDir, name: &str, len: u64) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap().set_len(len).unwrap();
        path
    }

    #[tokio::test]
    async fn test_from_path_rejects_oversized_file_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let len = 200 * MIB as u64;
        let path = sparse_file(&dir, "huge.mp4", len);

        let result = VideoFile::from_path(&path, None, MAX_VIDEO_BYTES).await;
        assert!(matches!(
            result,
            Err(AnalyzerError::FileTooLarge { size, max })
                if size == len && max == MAX_VIDEO_BYTES
        ));
    }

    #[tokio::test]
    async fn test_from_path_checks_type_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = sparse_file(&dir, "poster.png", 200 * MIB as u64);

        let result = VideoFile::from_path(&path, None, MAX_VIDEO_BYTES).await;
        assert!(matches!(result, Err(AnalyzerError::UnsupportedType(t)) if t == "image/png"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_from_path_never_reads_rejected_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = sparse_file(&dir, "locked.mp4", 9);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Metadata is readable without read permission, so only a read would fail with Io
        let result = VideoFile::from_path(&path, None, 8).await;
        assert!(matches!(result, Err(AnalyzerError::FileTooLarge { size: 9, max: 8 })));
    }
}
