//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The transcoder exited unsuccessfully.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        /// Tail of the transcoder's own output.
        output: Option<String>,
    },

    /// Conversion timed out.
    #[error("Conversion timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Failed to probe media file.
    #[error("Failed to probe media file: {reason}")]
    ProbeFailed { reason: String },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse FFprobe output.
    #[error("Failed to parse media info: {reason}")]
    ParseError { reason: String },
}

impl ConverterError {
    /// Creates a new conversion failed error with captured output.
    pub fn conversion_failed(reason: impl Into<String>, output: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            output,
        }
    }

    /// Creates a new probe failed error.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            reason: reason.into(),
        }
    }

    /// Captured transcoder output, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Self::ConversionFailed { output, .. } => output.as_deref(),
            _ => None,
        }
    }

    /// Message for a failure dialog: the error followed by the captured output.
    pub fn user_message(&self) -> String {
        match self.captured_output() {
            Some(output) if !output.trim().is_empty() => {
                format!("{}\n\n{}", self, output.trim_end())
            }
            _ => self.to_string(),
        }
    }
}
