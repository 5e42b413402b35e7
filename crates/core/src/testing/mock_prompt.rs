//! Recording prompt for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::session::Prompt;

/// A dialog the flow asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ConfirmOverwrite { path: PathBuf, accepted: bool },
    Error { title: String, message: String },
    Info { title: String, message: String },
}

/// Prompt that answers overwrite questions with a fixed reply and records
/// every dialog.
#[derive(Debug, Clone)]
pub struct RecordingPrompt {
    accept_overwrite: bool,
    dialogs: Arc<Mutex<Vec<Dialog>>>,
}

impl RecordingPrompt {
    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn declining() -> Self {
        Self::new(false)
    }

    fn new(accept_overwrite: bool) -> Self {
        Self {
            accept_overwrite,
            dialogs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every dialog shown so far, in order.
    pub fn dialogs(&self) -> Vec<Dialog> {
        self.lock().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .filter_map(|d| match d {
                Dialog::Error { title, message } => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .filter_map(|d| match d {
                Dialog::Info { title, message } => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Dialog>> {
        // A panicking test thread must not hide the dialogs from the others
        self.dialogs.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, dialog: Dialog) {
        self.lock().push(dialog);
    }
}

impl Prompt for RecordingPrompt {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        self.record(Dialog::ConfirmOverwrite {
            path: path.to_path_buf(),
            accepted: self.accept_overwrite,
        });
        self.accept_overwrite
    }

    fn show_error(&self, title: &str, message: &str) {
        self.record(Dialog::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn show_info(&self, title: &str, message: &str) {
        self.record(Dialog::Info {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
