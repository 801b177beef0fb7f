//! Configuration for code-collector.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File loading and discovery
//!
//! CLI flags are merged over the loaded file by the run layer.

mod error;
mod loading;
mod types;

pub use error::{ConfigError, ParseError};
pub use loading::{ConfigFormat, PROJECT_CONFIG_FILES};
pub use types::{Config, IgnoreConfig, OutputConfig};
