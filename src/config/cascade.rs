use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, Settings};
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".ruleset-tools.toml";

/// Discover and load all config files in the cascade.
///
/// Starts from `start_dir` and walks up the directory tree, stopping after a
/// file with `root = true`.
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			debug!(path = %config_path.display(), root = config.root, "loaded config");
			let is_root = config.root;

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if is_root {
				break;
			}
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => break,
		}
	}

	Ok(configs)
}

/// Merge configs into effective settings.
///
/// For each key the most specific config that sets it wins; defaults fill the rest.
pub fn merge_configs(configs: &[LoadedConfig]) -> Settings {
	let mut settings = Settings::default();

	// Least specific first so more specific files overwrite.
	for loaded in configs.iter().rev() {
		let config = &loaded.config;
		if let Some(ref suffix) = config.duplicate_suffix {
			settings.duplicate_suffix = suffix.clone();
		}
		if let Some(ref key) = config.app_key {
			settings.app_key = key.trim().to_string();
		}
	}

	settings
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_settings(start_dir: &Path) -> Result<Settings> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Config;
	use std::fs;
	use std::path::PathBuf;

	fn loaded(config: Config, path: &str) -> LoadedConfig {
		LoadedConfig {
			config,
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_merge_defaults_when_empty() {
		assert_eq!(merge_configs(&[]), Settings::default());
	}

	#[test]
	fn test_merge_most_specific_wins() {
		let project = Config {
			duplicate_suffix: Some("-project".to_string()),
			..Default::default()
		};
		let parent = Config {
			duplicate_suffix: Some("-parent".to_string()),
			app_key: Some("application".to_string()),
			..Default::default()
		};

		let settings = merge_configs(&[
			loaded(project, "/work/team/.ruleset-tools.toml"),
			loaded(parent, "/work/.ruleset-tools.toml"),
		]);

		assert_eq!(settings.duplicate_suffix, "-project");
		assert_eq!(settings.app_key, "application");
	}

	#[test]
	fn test_discover_stops_at_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let nested = temp_dir.path().join("a").join("b");
		fs::create_dir_all(&nested).unwrap();

		fs::write(
			temp_dir.path().join(CONFIG_FILE_NAME),
			"duplicate-suffix = \"-outer\"\n",
		)
		.unwrap();
		fs::write(
			temp_dir.path().join("a").join(CONFIG_FILE_NAME),
			"root = true\nduplicate-suffix = \"-copy\"\n",
		)
		.unwrap();
		fs::write(nested.join(CONFIG_FILE_NAME), "app-key = \"application\"\n").unwrap();

		let configs = discover_configs(&nested).unwrap();
		assert_eq!(configs.len(), 2);
		assert_eq!(configs[0].path, nested.join(CONFIG_FILE_NAME));

		let settings = merge_configs(&configs);
		assert_eq!(settings.app_key, "application");
		assert_eq!(settings.duplicate_suffix, "-copy");
	}
}
