//! Configuration loading for the ruleset tools.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Merging into effective settings

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{CONFIG_FILE_NAME, discover_configs, load_settings, merge_configs};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, LoadedConfig, Settings};
