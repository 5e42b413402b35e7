use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `MEDIACONV_CONVERTER__FFMPEG_PATH`
pub const ENV_PREFIX: &str = "MEDIACONV_";

/// Load configuration from built-in defaults, an optional TOML file and
/// environment variable overrides
///
/// A path that is given explicitly must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[converter]
ffmpeg_log_level = "info"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.converter.ffmpeg_log_level, "info");
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[defaults]
confirm_overwrite = "sometimes"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/mediaconv.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.defaults.confirm_overwrite);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[converter]
ffmpeg_path = "/usr/local/bin/ffmpeg"

[defaults]
open_directory_after = true
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(
            config.converter.ffmpeg_path,
            PathBuf::from("/usr/local/bin/ffmpeg")
        );
        assert_eq!(config.converter.ffprobe_path, PathBuf::from("ffprobe"));
        assert!(config.defaults.open_directory_after);
        assert!(config.defaults.confirm_overwrite);
    }
}
