//! Media category detection from file extensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Image formats accepted as input and offered as output.
pub const IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff"];

/// Audio formats accepted as input and offered as output.
pub const AUDIO_FORMATS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a"];

/// Video formats accepted as input and offered as output.
pub const VIDEO_FORMATS: &[&str] = &["mp4", "avi", "mkv", "mov", "webm", "flv"];

/// Broad category of a media file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    Image,
    Audio,
    Video,
    #[default]
    Unknown,
}

impl MediaCategory {
    /// Resolves an extension (without the leading dot), ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();

        if IMAGE_FORMATS.contains(&ext) {
            Self::Image
        } else if AUDIO_FORMATS.contains(&ext) {
            Self::Audio
        } else if VIDEO_FORMATS.contains(&ext) {
            Self::Video
        } else {
            Self::Unknown
        }
    }

    /// Resolves the category of a path from its final extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Output formats offered for this category.
    ///
    /// Video may be converted to any video or audio format (extracting the
    /// audio track). Images and audio stay within their own category. An
    /// empty list means conversion must be disabled.
    pub fn allowed_formats(&self) -> Vec<&'static str> {
        match self {
            Self::Image => IMAGE_FORMATS.to_vec(),
            Self::Audio => AUDIO_FORMATS.to_vec(),
            Self::Video => VIDEO_FORMATS.iter().chain(AUDIO_FORMATS).copied().collect(),
            Self::Unknown => Vec::new(),
        }
    }

    /// Whether `format` may be chosen as the output for this category.
    pub fn is_format_allowed(&self, format: &str) -> bool {
        let format = format.to_ascii_lowercase();
        self.allowed_formats().contains(&format.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
