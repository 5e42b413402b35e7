use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Initial values for the conversion form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Open the containing folder after a successful conversion
    #[serde(default)]
    pub open_directory_after: bool,
    /// Ask before overwriting an existing output file
    #[serde(default = "default_confirm_overwrite")]
    pub confirm_overwrite: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            open_directory_after: false,
            confirm_overwrite: default_confirm_overwrite(),
        }
    }
}

fn default_confirm_overwrite() -> bool {
    true
}
