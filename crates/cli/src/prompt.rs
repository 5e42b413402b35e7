use std::io::{self, BufRead, Write};
use std::path::Path;

use mediaconv_core::session::{overwrite_question, Prompt};

/// Dialogs rendered on the terminal. Questions go to stderr and are read from stdin.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{} [y/N] ", overwrite_question(path));
        let _ = stderr.flush();

        // EOF or a read error counts as "no"
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(n) if n > 0 => is_affirmative(&answer),
            _ => false,
        }
    }

    fn show_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }

    fn show_info(&self, title: &str, message: &str) {
        println!("{}: {}", title, message);
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
