//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use regex_lite::Regex;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionJob, ConversionProgress, ConversionResult, MediaInfo};

/// Number of trailing ffmpeg output lines kept for error reports.
const CAPTURED_OUTPUT_LINES: usize = 64;

/// Minimum spacing between progress updates.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

/// Folds `-progress` key/value lines into a running position.
struct ProgressTracker {
    line_re: Option<Regex>,
    time_re: Option<Regex>,
    speed_re: Option<Regex>,
    time_secs: f64,
    speed: Option<String>,
}

impl ProgressTracker {
    fn new() -> Self {
        Self {
            line_re: Regex::new(r"^[a-z0-9_]+=\S*$").ok(),
            time_re: Regex::new(r"^out_time_ms=(\d+)$").ok(),
            speed_re: Regex::new(r"^speed=\s*(\d+\.?\d*)x$").ok(),
            time_secs: 0.0,
            speed: None,
        }
    }

    /// Consumes a stderr line. Returns false for lines that are not progress output.
    fn observe(&mut self, line: &str) -> bool {
        let line = line.trim();
        let is_progress = self
            .line_re
            .as_ref()
            .is_some_and(|re| re.is_match(line));
        if !is_progress {
            return false;
        }

        if let Some(caps) = self.time_re.as_ref().and_then(|re| re.captures(line)) {
            // out_time_ms is reported in microseconds
            if let Ok(us) = caps[1].parse::<f64>() {
                self.time_secs = us / 1_000_000.0;
            }
        }
        if let Some(caps) = self.speed_re.as_ref().and_then(|re| re.captures(line)) {
            self.speed = Some(format!("{}x", &caps[1]));
        }
        true
    }

    fn snapshot(&self, job_id: &str, duration_secs: Option<f64>) -> ConversionProgress {
        let percent = match duration_secs {
            Some(dur) if dur > 0.0 => (self.time_secs / dur * 100.0).min(100.0) as f32,
            _ => 0.0,
        };
        ConversionProgress {
            job_id: job_id.to_string(),
            percent,
            time_secs: self.time_secs,
            duration_secs,
            speed: self.speed.clone(),
        }
    }
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Builds the ffmpeg argument list. The encoder is inferred from the output extension.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-progress".to_string(),
            "pipe:2".to_string(),
            "-nostats".to_string(),
        ];

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());
        args.push(output_path.to_string_lossy().to_string());

        args
    }

    fn spawn_error(&self, e: std::io::Error, ffprobe: bool) -> ConverterError {
        match (e.kind(), ffprobe) {
            (std::io::ErrorKind::NotFound, false) => ConverterError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            },
            (std::io::ErrorKind::NotFound, true) => ConverterError::FfprobeNotFound {
                path: self.config.ffprobe_path.clone(),
            },
            _ => ConverterError::Io(e),
        }
    }

    /// Parses ffprobe JSON output into MediaInfo.
    fn parse_probe_output(path: &Path, output: &str) -> Result<MediaInfo, ConverterError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            duration: Option<String>,
            size: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            bit_rate: Option<String>,
            sample_rate: Option<String>,
            channels: Option<u8>,
            width: Option<u32>,
            height: Option<u32>,
            r_frame_rate: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| ConverterError::ParseError {
                reason: format!("Failed to parse ffprobe output: {}", e),
            })?;

        let duration_secs = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        let size_bytes = probe
            .format
            .size
            .as_ref()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let audio_stream = probe.streams.iter().find(|s| s.codec_type == "audio");
        let video_stream = probe.streams.iter().find(|s| s.codec_type == "video");

        let format_name = probe
            .format
            .format_name
            .split(',')
            .next()
            .unwrap_or("unknown");

        Ok(MediaInfo {
            path: path.to_path_buf(),
            size_bytes,
            duration_secs,
            format: format_name.to_string(),
            audio_codec: audio_stream.and_then(|s| s.codec_name.clone()),
            audio_bitrate_kbps: audio_stream
                .and_then(|s| s.bit_rate.as_ref())
                .and_then(|b| b.parse::<u32>().ok())
                .map(|b| b / 1000),
            audio_sample_rate: audio_stream
                .and_then(|s| s.sample_rate.as_ref())
                .and_then(|r| r.parse::<u32>().ok()),
            audio_channels: audio_stream.and_then(|s| s.channels),
            video_codec: video_stream.and_then(|s| s.codec_name.clone()),
            video_width: video_stream.and_then(|s| s.width),
            video_height: video_stream.and_then(|s| s.height),
            video_fps: video_stream
                .and_then(|s| s.r_frame_rate.as_deref())
                .and_then(parse_frame_rate),
        })
    }

    /// Runs the conversion with optional progress reporting.
    async fn run_conversion(
        &self,
        job: &ConversionJob,
        progress_tx: Option<mpsc::Sender<ConversionProgress>>,
    ) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if !job.input_path.exists() {
            return Err(ConverterError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        // Duration is only needed to turn positions into percentages
        let duration_secs = match progress_tx {
            Some(_) => self
                .probe(&job.input_path)
                .await
                .ok()
                .map(|i| i.duration_secs),
            None => None,
        };

        let args = self.build_args(&job.input_path, &job.output_path);
        debug!(job_id = %job.job_id, ?args, "Spawning ffmpeg");

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e, false))?;

        let stderr = child.stderr.take().ok_or_else(|| {
            ConverterError::Io(std::io::Error::other("ffmpeg stderr was not captured"))
        })?;
        let mut reader = BufReader::new(stderr);

        let work = async {
            let mut tracker = ProgressTracker::new();
            let mut captured: VecDeque<String> = VecDeque::with_capacity(CAPTURED_OUTPUT_LINES);
            let mut last_progress_send = Instant::now();

            // ffmpeg echoes paths and metadata as raw bytes, so lines are decoded lossily
            let mut buf = Vec::new();
            while reader.read_until(b'\n', &mut buf).await? > 0 {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                buf.clear();

                if !tracker.observe(&line) {
                    if captured.len() == CAPTURED_OUTPUT_LINES {
                        captured.pop_front();
                    }
                    captured.push_back(line);
                    continue;
                }

                if let Some(ref tx) = progress_tx {
                    if last_progress_send.elapsed() >= PROGRESS_INTERVAL {
                        // Non-blocking send
                        let _ = tx.try_send(tracker.snapshot(&job.job_id, duration_secs));
                        last_progress_send = Instant::now();
                    }
                }
            }

            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, Vec::from(captured).join("\n")))
        };

        let outcome = match self.config.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), work).await.ok(),
            None => Some(work.await),
        };

        let (status, captured) = match outcome {
            Some(result) => result?,
            None => {
                // Kill the process on timeout
                let _ = child.kill().await;
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs.unwrap_or_default(),
                });
            }
        };

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("FFmpeg exited with code {}", code),
                None => "FFmpeg was terminated by a signal".to_string(),
            };
            return Err(ConverterError::conversion_failed(
                reason,
                (!captured.is_empty()).then_some(captured),
            ));
        }

        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            job_id = %job.job_id,
            output = %job.output_path.display(),
            duration_ms,
            "Conversion finished"
        );

        Ok(ConversionResult {
            job_id: job.job_id.clone(),
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms,
            input_format: extension_of(&job.input_path),
            output_format: extension_of(&job.output_path),
        })
    }
}

/// Parses a frame rate like "24000/1001" or "30".
fn parse_frame_rate(rate: &str) -> Option<f32> {
    match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f32>().ok()?;
            let den = den.parse::<f32>().ok()?;
            (den > 0.0).then(|| num / den)
        }
        None => rate.parse::<f32>().ok(),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        if !path.exists() {
            return Err(ConverterError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e, true))?;

        if !output.status.success() {
            return Err(ConverterError::probe_failed(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job, None).await
    }

    async fn convert_with_progress(
        &self,
        job: ConversionJob,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job, Some(progress_tx)).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e, false))?;

        Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e, true))?;

        Ok(())
    }
}
