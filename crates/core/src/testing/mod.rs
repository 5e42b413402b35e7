//! Testing utilities and mock implementations.
//!
//! This module provides doubles for the converter and dialog seams, so the
//! whole conversion flow can be driven without ffmpeg or a front end.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediaconv_core::testing::{MockConverter, RecordingPrompt};
//!
//! let converter = MockConverter::new();
//! let prompt = RecordingPrompt::declining();
//!
//! let session = ConversionSession::new(converter.clone());
//! session.attempt(&form, &prompt).await;
//!
//! assert!(prompt.infos().is_empty());
//! ```

mod mock_converter;
mod mock_prompt;

pub use mock_converter::{MockConverter, RecordedConversion};
pub use mock_prompt::{Dialog, RecordingPrompt};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::session::FormState;

    /// A form ready to convert `input` to `format`.
    pub fn ready_form(input: impl AsRef<Path>, format: &str) -> FormState {
        FormState::new(false).select_file(input).select_format(format)
    }

    /// Creates a placeholder media file inside `dir`.
    pub fn media_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"placeholder media").expect("Failed to write fixture file");
        path
    }
}
