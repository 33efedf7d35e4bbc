//! Configuration file loading for llm-council
//!
//! Sources are merged from lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. global config (`$XDG_CONFIG_HOME/llm-council/config.toml`, falling
//!    back to `~/.config/llm-council/config.toml`)
//! 3. project config (`./council.toml` or `./.council.toml`)
//! 4. an explicit `--config <path>` file

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCouncilConfig, FileGatewayConfig, FileOutputConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
