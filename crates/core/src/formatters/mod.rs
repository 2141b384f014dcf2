pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, LocationOutput, to_json};
pub use text::{TextConfig, TextFormatter, format_locations};
#[cfg(feature = "markdown")]
pub use text::{format_content_start, format_preservation};
