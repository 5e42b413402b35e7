//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use crate::converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterError, MediaInfo,
};
use crate::media::MediaCategory;

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Simulate success/failure
/// - Control probe results
/// - Simulate progress updates
/// - Optionally write the output file, like a real transcoder would
///
/// Clones share state, so a test can keep one handle and give another to a
/// [`ConversionSession`](crate::session::ConversionSession).
///
/// # Example
///
/// ```rust,ignore
/// use mediaconv_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// let session = ConversionSession::new(converter.clone());
///
/// session.attempt(&form, &prompt).await;
///
/// let conversions = converter.recorded_conversions().await;
/// assert_eq!(conversions.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Pre-configured probe results by path.
    probe_results: Arc<RwLock<HashMap<PathBuf, MediaInfo>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether to send progress updates during conversion.
    send_progress: Arc<RwLock<bool>>,
    /// Whether successful conversions create the output file.
    write_output: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            probe_results: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            send_progress: Arc::new(RwLock::new(true)),
            write_output: Arc::new(RwLock::new(false)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Set a probe result for a specific path.
    pub async fn set_probe_result(&self, path: impl AsRef<Path>, info: MediaInfo) {
        self.probe_results
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), info);
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Enable or disable progress updates during conversion.
    pub async fn set_send_progress(&self, send: bool) {
        *self.send_progress.write().await = send;
    }

    /// Make successful conversions write a small output file.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }

    /// Create a default MediaInfo for testing.
    fn create_default_info(path: &Path) -> MediaInfo {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_ascii_lowercase();
        let category = MediaCategory::from_extension(&extension);
        let has_frames = matches!(category, MediaCategory::Image | MediaCategory::Video);
        let has_audio = matches!(category, MediaCategory::Audio | MediaCategory::Video);

        MediaInfo {
            path: path.to_path_buf(),
            size_bytes: 10 * 1024 * 1024, // 10 MB
            duration_secs: match category {
                MediaCategory::Video => 600.0,
                MediaCategory::Audio => 180.0,
                _ => 0.0,
            },
            format: extension.clone(),
            audio_codec: has_audio.then(|| "aac".to_string()),
            audio_bitrate_kbps: has_audio.then_some(192),
            audio_sample_rate: has_audio.then_some(48000),
            audio_channels: has_audio.then_some(2),
            video_codec: has_frames.then(|| "h264".to_string()),
            video_width: has_frames.then_some(1920),
            video_height: has_frames.then_some(1080),
            video_fps: (category == MediaCategory::Video).then_some(30.0),
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_ascii_lowercase()
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        // Check for pre-configured result
        if let Some(info) = self.probe_results.read().await.get(path) {
            return Ok(info.clone());
        }

        Ok(Self::create_default_info(path))
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        if let Some(err) = self.take_error().await {
            self.conversions.write().await.push(RecordedConversion {
                job,
                success: false,
            });
            return Err(err);
        }

        // Simulate conversion time
        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let mut output_size_bytes = 5 * 1024 * 1024;
        if *self.write_output.read().await {
            let contents = format!("converted from {}", job.input_path.display());
            tokio::fs::write(&job.output_path, &contents).await?;
            output_size_bytes = contents.len() as u64;
        }

        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success: true,
        });

        Ok(ConversionResult {
            input_format: extension_of(&job.input_path),
            output_format: extension_of(&job.output_path),
            job_id: job.job_id,
            output_path: job.output_path,
            output_size_bytes,
            duration_ms,
        })
    }

    async fn convert_with_progress(
        &self,
        job: ConversionJob,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConverterError> {
        let send_progress = *self.send_progress.read().await;
        let duration_ms = *self.conversion_duration_ms.read().await;

        if send_progress {
            let steps = 5u64;
            let step_duration = duration_ms / steps;

            for i in 1..=steps {
                let _ = progress_tx
                    .send(ConversionProgress {
                        job_id: job.job_id.clone(),
                        percent: (i as f32 / steps as f32) * 100.0,
                        time_secs: i as f64 * (step_duration as f64 / 1000.0),
                        duration_secs: Some(duration_ms as f64 / 1000.0),
                        speed: Some("10x".to_string()),
                    })
                    .await;

                if step_duration > 0 {
                    tokio::time::sleep(Duration::from_millis(step_duration)).await;
                }
            }
        }

        self.convert(job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}
