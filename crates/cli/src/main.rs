mod args;
mod prompt;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediaconv_core::{
    load_config,
    session::{open_directory, AttemptOutcome, ConversionSession, FormState},
    validate_config, Config, ConversionProgress, Converter, FfmpegConverter, MediaCategory,
};

use args::{Cli, Command, ConvertArgs};
use prompt::TerminalPrompt;

/// Config file picked up from the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "mediaconv.toml";

/// Exit status for a transcoder failure
const EXIT_FAILED: u8 = 1;

/// Exit status for a request rejected before invocation
const EXIT_REJECTED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::from(EXIT_FAILED)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.or_else(|| {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    });

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    match cli.command {
        Command::Convert(args) => convert(&config, args).await,
        Command::Formats { input } => Ok(formats(&input)),
        Command::Probe { input } => {
            let converter = FfmpegConverter::new(config.converter.clone());
            let info = converter
                .probe(&input)
                .await
                .with_context(|| format!("Failed to probe {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let converter = FfmpegConverter::new(config.converter.clone());
            converter
                .validate()
                .await
                .context("ffmpeg is not usable")?;
            println!(
                "ffmpeg: {}\nffprobe: {}",
                config.converter.ffmpeg_path.display(),
                config.converter.ffprobe_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn convert(config: &Config, args: ConvertArgs) -> Result<ExitCode> {
    let mut form = FormState::new(args.open_directory_after(config.defaults.open_directory_after))
        .select_file(&args.input)
        .select_format(args.format.as_str());
    if let Some(name) = args.name.as_deref() {
        form = form.rename(name);
    }

    let prompt = TerminalPrompt::new(args.yes);
    let mut session = ConversionSession::new(FfmpegConverter::new(config.converter.clone()))
        .with_confirm_overwrite(config.defaults.confirm_overwrite);

    let printer = if args.progress {
        let (tx, rx) = mpsc::channel(16);
        session = session.with_progress(tx);
        Some(tokio::spawn(print_progress(rx)))
    } else {
        None
    };

    let outcome = session.attempt(&form, &prompt).await;

    // Closes the progress channel so the printer finishes
    drop(session);
    if let Some(printer) = printer {
        let _ = printer.await;
    }

    if let Some(dir) = outcome.directory_to_open() {
        if let Err(e) = open_directory(dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to open output directory");
        }
    }

    Ok(match outcome {
        AttemptOutcome::Converted { .. } | AttemptOutcome::Declined => ExitCode::SUCCESS,
        AttemptOutcome::Failed(_) => ExitCode::from(EXIT_FAILED),
        AttemptOutcome::Rejected(_) => ExitCode::from(EXIT_REJECTED),
    })
}

fn formats(input: &Path) -> ExitCode {
    let category = MediaCategory::from_path(input);
    let formats = category.allowed_formats();

    if formats.is_empty() {
        eprintln!("{}: not an image, audio or video file", input.display());
        return ExitCode::from(EXIT_REJECTED);
    }

    eprintln!("{} ({})", input.display(), category);
    for format in formats {
        println!("{}", format);
    }
    ExitCode::SUCCESS
}

async fn print_progress(mut rx: mpsc::Receiver<ConversionProgress>) {
    while let Some(progress) = rx.recv().await {
        match progress.speed {
            Some(speed) => eprintln!(
                "progress: {:5.1}% at {:.1}s ({})",
                progress.percent, progress.time_secs, speed
            ),
            None => eprintln!(
                "progress: {:5.1}% at {:.1}s",
                progress.percent, progress.time_secs
            ),
        }
    }
}
