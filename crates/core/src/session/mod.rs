//! Front-end independent conversion flow.
//!
//! A front end keeps a [`FormState`], feeds user actions through its
//! transition methods, and hands it to [`ConversionSession::attempt`] when
//! the user asks to convert. Dialogs go through the [`Prompt`] trait so the
//! whole flow runs without any UI.

mod form;
mod opener;
mod prompt;
mod runner;

pub use form::FormState;
pub use opener::{open_command, open_directory};
pub use prompt::{overwrite_question, Prompt};
pub use runner::{AttemptOutcome, ConversionSession};
