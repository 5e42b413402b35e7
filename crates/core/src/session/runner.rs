//! One conversion attempt, from form state to dialogs.

use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::form::FormState;
use super::prompt::Prompt;
use crate::converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterError,
};
use crate::media::{ConversionRequest, RequestError};

/// How an attempt ended.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The transcoder produced the output.
    Converted {
        request: ConversionRequest,
        result: ConversionResult,
    },
    /// The output existed and the user kept it.
    Declined,
    /// The form was incomplete or inconsistent; nothing was invoked.
    Rejected(RequestError),
    /// The transcoder failed. Any partial output is left in place.
    Failed(ConverterError),
}

impl AttemptOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// Folder the front end should open, if the user asked for it.
    pub fn directory_to_open(&self) -> Option<&Path> {
        match self {
            Self::Converted { request, .. } if request.open_directory_after => {
                Some(request.output_directory.as_path())
            }
            _ => None,
        }
    }
}

/// Runs attempts against a converter. One attempt at a time, awaited by the caller.
pub struct ConversionSession<C: Converter> {
    converter: C,
    confirm_overwrite: bool,
    progress_tx: Option<mpsc::Sender<ConversionProgress>>,
}

impl<C: Converter> ConversionSession<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            confirm_overwrite: true,
            progress_tx: None,
        }
    }

    /// When disabled, existing outputs are replaced without asking.
    pub fn with_confirm_overwrite(mut self, confirm: bool) -> Self {
        self.confirm_overwrite = confirm;
        self
    }

    /// Forwards transcoder progress to `tx`.
    pub fn with_progress(mut self, tx: mpsc::Sender<ConversionProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Converts whatever the form currently describes.
    ///
    /// A rejected request shows a single error and a declined overwrite
    /// shows nothing beyond the question. Otherwise the attempt ends with
    /// exactly one success or failure dialog.
    pub async fn attempt(&self, form: &FormState, prompt: &dyn Prompt) -> AttemptOutcome {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Conversion request rejected");
                prompt.show_error("Error", &e.to_string());
                return AttemptOutcome::Rejected(e);
            }
        };

        let output_path = request.output_path();
        if self.confirm_overwrite
            && tokio::fs::try_exists(&output_path).await.unwrap_or(false)
            && !prompt.confirm_overwrite(&output_path)
        {
            info!(output = %output_path.display(), "Overwrite declined");
            return AttemptOutcome::Declined;
        }

        let job = ConversionJob::from(&request);
        info!(
            job_id = %job.job_id,
            input = %request.input_path.display(),
            output = %output_path.display(),
            category = %request.category(),
            "Starting conversion"
        );

        let result = match &self.progress_tx {
            Some(tx) => self.converter.convert_with_progress(job, tx.clone()).await,
            None => self.converter.convert(job).await,
        };

        match result {
            Ok(result) => {
                prompt.show_info(
                    "Success",
                    &format!("Converted to:\n{}", result.output_path.display()),
                );
                AttemptOutcome::Converted { request, result }
            }
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                prompt.show_error("FFmpeg Error", &e.user_message());
                AttemptOutcome::Failed(e)
            }
        }
    }
}
