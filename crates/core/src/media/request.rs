//! Validated, per-attempt conversion request.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::category::MediaCategory;
use super::naming;

/// Reasons a request is rejected before the transcoder is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No input file selected.
    #[error("Please select a file and output format.")]
    MissingInput,

    /// No output format chosen.
    #[error("Please select a file and output format.")]
    MissingFormat,

    /// The input's extension maps to no known category.
    #[error("Unsupported input type: {extension:?}")]
    UnsupportedInput { extension: String },

    /// The chosen format is not offered for the input's category.
    #[error("Cannot convert {category} to {format}")]
    FormatNotAllowed {
        format: String,
        category: MediaCategory,
    },

    /// The output would overwrite the input file itself.
    #[error("Output file is the same as the input: {}", path.display())]
    OutputIsInput { path: PathBuf },
}

/// Everything needed for one conversion, captured at the moment of invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    /// Lowercase output extension, always allowed for the input's category.
    pub output_format: String,
    pub output_base_name: String,
    pub output_directory: PathBuf,
    pub open_directory_after: bool,
}

impl ConversionRequest {
    /// Validates the inputs and derives the output location.
    ///
    /// An empty or missing `base_name` falls back to the input's own name.
    pub fn new(
        input: Option<&Path>,
        format: Option<&str>,
        base_name: Option<&str>,
        open_directory_after: bool,
    ) -> Result<Self, RequestError> {
        let input = input
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(RequestError::MissingInput)?;
        let format = format
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or(RequestError::MissingFormat)?
            .to_ascii_lowercase();

        let category = MediaCategory::from_path(input);
        if category == MediaCategory::Unknown {
            return Err(RequestError::UnsupportedInput {
                extension: input
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            });
        }
        if !category.is_format_allowed(&format) {
            return Err(RequestError::FormatNotAllowed { format, category });
        }

        let request = Self {
            input_path: input.to_path_buf(),
            output_format: format,
            output_base_name: naming::resolve_base_name(base_name, input),
            output_directory: naming::output_directory(input),
            open_directory_after,
        };
        if request.output_path() == request.input_path {
            return Err(RequestError::OutputIsInput {
                path: request.input_path,
            });
        }
        Ok(request)
    }

    pub fn category(&self) -> MediaCategory {
        MediaCategory::from_path(&self.input_path)
    }

    /// Where the transcoder will write.
    pub fn output_path(&self) -> PathBuf {
        naming::output_path(
            &self.output_directory,
            &self.output_base_name,
            &self.output_format,
        )
    }
}
