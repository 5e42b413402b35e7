//! Dialog seam between the conversion flow and a front end.

use std::path::Path;

/// Blocking dialogs shown to the user during an attempt.
pub trait Prompt: Send + Sync {
    /// Asks whether an existing output file may be replaced.
    fn confirm_overwrite(&self, path: &Path) -> bool;

    /// Reports a failure.
    fn show_error(&self, title: &str, message: &str);

    /// Reports a success.
    fn show_info(&self, title: &str, message: &str);
}

/// Confirmation text for an existing output file.
pub fn overwrite_question(path: &Path) -> String {
    format!(
        "The file:\n{}\nalready exists.\nDo you want to overwrite it?",
        path.display()
    )
}
