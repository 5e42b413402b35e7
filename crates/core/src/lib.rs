pub mod config;
pub mod converter;
pub mod media;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DefaultsConfig,
};
pub use converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterConfig,
    ConverterError, FfmpegConverter, MediaInfo,
};
pub use media::{ConversionRequest, MediaCategory, RequestError};
pub use session::{AttemptOutcome, ConversionSession, FormState, Prompt};
