//! Conversion form state.
//!
//! Every user action is a method that consumes the current state and returns
//! the next one. Front ends render the returned state and call
//! [`FormState::to_request`] when the user presses convert.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::media::{default_base_name, ConversionRequest, MediaCategory, RequestError};

/// What the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub input_path: Option<PathBuf>,
    pub category: MediaCategory,
    /// Formats offered for the current input. Empty disables conversion.
    pub format_options: Vec<&'static str>,
    pub selected_format: Option<String>,
    /// Rename field. Pre-filled with the input's name on selection.
    pub base_name: String,
    pub open_directory_after: bool,
}

impl FormState {
    pub fn new(open_directory_after: bool) -> Self {
        Self {
            open_directory_after,
            ..Default::default()
        }
    }

    /// A file was picked. Options and the rename field follow the new input;
    /// a previously chosen format survives only if it is still offered.
    pub fn select_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let category = MediaCategory::from_path(path);
        let format_options = category.allowed_formats();
        let selected_format = self
            .selected_format
            .filter(|f| category.is_format_allowed(f));

        Self {
            input_path: Some(path.to_path_buf()),
            category,
            format_options,
            selected_format,
            base_name: default_base_name(path),
            ..self
        }
    }

    /// A file was dropped on the input field.
    ///
    /// Drop payloads wrap paths containing spaces in braces; those are removed.
    pub fn drop_file(self, payload: &str) -> Self {
        let payload = payload.trim();
        let path = payload
            .strip_prefix('{')
            .and_then(|p| p.strip_suffix('}'))
            .unwrap_or(payload);

        if path.is_empty() {
            return self;
        }
        self.select_file(path)
    }

    pub fn select_format(self, format: impl Into<String>) -> Self {
        Self {
            selected_format: Some(format.into()),
            ..self
        }
    }

    pub fn rename(self, base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..self
        }
    }

    pub fn set_open_directory_after(self, open_directory_after: bool) -> Self {
        Self {
            open_directory_after,
            ..self
        }
    }

    /// Whether the convert action should be enabled.
    pub fn can_convert(&self) -> bool {
        self.input_path.is_some() && !self.format_options.is_empty()
    }

    /// Freezes the form into the request for one attempt.
    pub fn to_request(&self) -> Result<ConversionRequest, RequestError> {
        ConversionRequest::new(
            self.input_path.as_deref(),
            self.selected_format.as_deref(),
            Some(self.base_name.as_str()),
            self.open_directory_after,
        )
    }
}
