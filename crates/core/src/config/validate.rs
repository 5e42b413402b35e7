use super::{types::Config, ConfigError};

/// Log levels ffmpeg accepts for `-loglevel`
const FFMPEG_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Validate configuration
/// Currently validates:
/// - ffmpeg and ffprobe paths are not empty
/// - ffmpeg log level is one ffmpeg understands
/// - timeout, when set, is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let converter = &config.converter;

    if converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if converter.ffprobe_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffprobe_path cannot be empty".to_string(),
        ));
    }

    if !FFMPEG_LOG_LEVELS.contains(&converter.ffmpeg_log_level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "converter.ffmpeg_log_level must be one of {}, got {:?}",
            FFMPEG_LOG_LEVELS.join(", "),
            converter.ffmpeg_log_level
        )));
    }

    if converter.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "converter.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
