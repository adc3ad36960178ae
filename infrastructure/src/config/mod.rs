//! Configuration file loading for story-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `COUNCIL_` (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/story-council/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDebateConfig, FileDeckConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig,
};
pub use loader::ConfigLoader;
