//! Converter module for transcoding media files.
//!
//! This module provides the `Converter` trait and an implementation that
//! shells out to FFmpeg. The output container and encoder are inferred by
//! FFmpeg from the output file's extension.
//!
//! # Features
//!
//! - Single blocking conversion per call, overwriting existing output
//! - Captured transcoder output on failure
//! - Progress reporting during conversion
//! - Media probing through FFprobe
//!
//! # Example
//!
//! ```ignore
//! use mediaconv_core::converter::{Converter, ConversionJob, FfmpegConverter};
//!
//! let converter = FfmpegConverter::with_defaults();
//!
//! // Validate ffmpeg is available
//! converter.validate().await?;
//!
//! // Probe a media file
//! let info = converter.probe(Path::new("/path/to/clip.mov")).await?;
//! println!("Duration: {} seconds", info.duration_secs);
//!
//! let job = ConversionJob::new(
//!     PathBuf::from("/path/to/clip.mov"),
//!     PathBuf::from("/path/to/clip.mp4"),
//! );
//! let result = converter.convert(job).await?;
//! println!("Converted in {} ms", result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{ConversionJob, ConversionProgress, ConversionResult, MediaInfo};
