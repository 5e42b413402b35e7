//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::media::ConversionRequest;

/// A single transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Unique job ID, used to correlate progress updates.
    pub job_id: String,
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path. The output container is inferred from its extension.
    pub output_path: PathBuf,
}

impl ConversionJob {
    /// Creates a job with a fresh ID.
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            input_path,
            output_path,
        }
    }
}

impl From<&ConversionRequest> for ConversionJob {
    fn from(request: &ConversionRequest) -> Self {
        Self::new(request.input_path.clone(), request.output_path())
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Job ID.
    pub job_id: String,
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Conversion duration in milliseconds.
    pub duration_ms: u64,
    /// Input extension.
    pub input_format: String,
    /// Output extension.
    pub output_format: String,
}

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Duration in seconds (0 for still images).
    pub duration_secs: f64,
    /// Container format (e.g., "flac", "mov").
    pub format: String,
    /// Audio codec (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    /// Audio bitrate in kbps (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bitrate_kbps: Option<u32>,
    /// Audio sample rate (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,
    /// Audio channels (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_channels: Option<u8>,
    /// Video or image codec (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    /// Frame width (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_width: Option<u32>,
    /// Frame height (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_height: Option<u32>,
    /// Frame rate (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_fps: Option<f32>,
}

/// Progress update during conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionProgress {
    /// Job ID.
    pub job_id: String,
    /// Progress percentage (0.0 - 100.0). Stays at 0 when the duration is unknown.
    pub percent: f32,
    /// Current processing time in seconds.
    pub time_secs: f64,
    /// Total input duration in seconds, when known.
    pub duration_secs: Option<f64>,
    /// Current processing speed (e.g., "1.5x").
    pub speed: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_job_ids_are_unique() {
        let a = ConversionJob::new(PathBuf::from("/in.mov"), PathBuf::from("/out.mp4"));
        let b = ConversionJob::new(PathBuf::from("/in.mov"), PathBuf::from("/out.mp4"));
        assert_ne!(a.job_id, b.job_id);
    }

    #[test]
    fn test_job_from_request() {
        let request = ConversionRequest::new(
            Some(Path::new("/a/b/clip.mov")),
            Some("webm"),
            Some("out"),
            false,
        )
        .unwrap();
        let job = ConversionJob::from(&request);
        assert_eq!(job.input_path, PathBuf::from("/a/b/clip.mov"));
        assert_eq!(job.output_path, PathBuf::from("/a/b/out.webm"));
    }

    #[test]
    fn test_media_info_skips_absent_streams() {
        let info = MediaInfo {
            path: PathBuf::from("/a/song.mp3"),
            size_bytes: 1024,
            duration_secs: 3.5,
            format: "mp3".to_string(),
            audio_codec: Some("mp3".to_string()),
            audio_bitrate_kbps: Some(320),
            audio_sample_rate: Some(44100),
            audio_channels: Some(2),
            video_codec: None,
            video_width: None,
            video_height: None,
            video_fps: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["audio_codec"], "mp3");
        assert!(json.get("video_codec").is_none());
    }
}
