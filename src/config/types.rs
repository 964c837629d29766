use serde::Deserialize;
use std::path::PathBuf;

/// Default suffix appended to a ruleset name that does not contain the old label.
pub const DEFAULT_DUPLICATE_SUFFIX: &str = "-duplicate";

/// Default scope key identifying the application label.
pub const DEFAULT_APP_KEY: &str = "app";

/// Configuration from a single `.ruleset-tools.toml` file.
///
/// Only naming details of rewritten rows are configurable; output file name,
/// excluded columns and failure reporting are fixed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop the upward directory walk at this file.
	#[serde(default)]
	pub root: bool,

	/// Suffix appended to ruleset names that do not contain the old label.
	pub duplicate_suffix: Option<String>,

	/// Scope key holding the application label.
	pub app_key: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub duplicate_suffix: String,
	pub app_key: String,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			duplicate_suffix: DEFAULT_DUPLICATE_SUFFIX.to_string(),
			app_key: DEFAULT_APP_KEY.to_string(),
		}
	}
}

impl Config {
	/// Reject values that would make a run meaningless.
	pub fn validate(&self) -> Result<(), crate::error::RulesetError> {
		if let Some(ref key) = self.app_key
			&& key.trim().is_empty()
		{
			return Err(crate::error::RulesetError::InvalidConfig {
				key: "app-key".to_string(),
				message: "must not be empty".to_string(),
			});
		}

		Ok(())
	}
}
