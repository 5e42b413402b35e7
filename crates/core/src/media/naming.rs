//! Output file naming.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::warn;

/// File name of `input` without its directory and final extension.
pub fn default_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directory the input lives in. Outputs are written next to the input.
pub fn output_directory(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Joins `directory`, `base_name` and `format` into `directory/base_name.format`.
///
/// The base name is used verbatim.
pub fn output_path(directory: &Path, base_name: &str, format: &str) -> PathBuf {
    directory.join(format!("{}.{}", base_name, format))
}

/// Picks the base name for an attempt from the optional rename field.
pub fn resolve_base_name(requested: Option<&str>, input: &Path) -> String {
    match requested {
        Some(name) if !name.is_empty() => {
            if name.contains('/') || name.contains(MAIN_SEPARATOR) {
                warn!(
                    base_name = name,
                    "Output name contains a path separator; output will not land next to the input"
                );
            }
            name.to_string()
        }
        _ => default_base_name(input),
    }
}
