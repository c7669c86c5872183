//! Configuration system for procview.
//!
//! Provides TOML-based configuration with:
//! - `[oauth]`: token endpoint, client id, secret source, scope, timeout
//! - `[engine]`: workflow engine base URL and request timeout
//! - Config file discovery (project-local, then user config dir)
//! - Client secret resolution (env var → config file)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{LoadedConfig, config_dir, load_config, load_config_file, load_first, search_paths};
pub use error::{ConfigError, Result};
pub use types::*;
