use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Convert images, audio and video with ffmpeg
#[derive(Debug, Parser)]
#[command(name = "mediaconv", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./mediaconv.toml when present)
    #[arg(long, global = true, env = "MEDIACONV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a file next to the original
    Convert(ConvertArgs),
    /// List the output formats offered for a file
    Formats {
        input: PathBuf,
    },
    /// Show stream information for a file
    Probe {
        input: PathBuf,
    },
    /// Check that ffmpeg and ffprobe can be run
    Check,
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// File to convert
    pub input: PathBuf,

    /// Output format (file extension)
    #[arg(long = "to", short = 't')]
    pub format: String,

    /// Output file name without extension (defaults to the input's name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Open the containing folder afterwards
    #[arg(long, overrides_with = "no_open_dir")]
    pub open_dir: bool,

    /// Do not open the containing folder afterwards
    #[arg(long)]
    pub no_open_dir: bool,

    /// Overwrite an existing output without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print progress updates
    #[arg(long)]
    pub progress: bool,
}

impl ConvertArgs {
    /// Resolves the open-folder switches against the configured default.
    pub fn open_directory_after(&self, default: bool) -> bool {
        if self.open_dir {
            true
        } else if self.no_open_dir {
            false
        } else {
            default
        }
    }
}
