//! Media decision logic: category detection, output naming and request validation.
//!
//! Nothing in this module touches the filesystem or spawns processes, so it
//! can be exercised without a transcoder or a front end.

mod category;
mod naming;
mod request;

pub use category::{MediaCategory, AUDIO_FORMATS, IMAGE_FORMATS, VIDEO_FORMATS};
pub use naming::{default_base_name, output_directory, output_path, resolve_base_name};
pub use request::{ConversionRequest, RequestError};
