//! Shared plumbing for the command-line tools.

use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

/// Rewrite single-dash long flags (`-csv path`, `-csv=path`) into the
/// `--csv` form clap expects. Arguments after `--` are left alone.
pub fn normalize_long_flags<I>(args: I, long_flags: &[&str]) -> Vec<OsString>
where
	I: IntoIterator<Item = OsString>,
{
	let mut normalized = Vec::new();
	let mut passthrough = false;

	for arg in args {
		if passthrough {
			normalized.push(arg);
			continue;
		}

		let Some(text) = arg.to_str().map(str::to_owned) else {
			normalized.push(arg);
			continue;
		};

		if text == "--" {
			passthrough = true;
			normalized.push(arg);
			continue;
		}

		let rewritten = text
			.strip_prefix('-')
			.filter(|rest| !rest.starts_with('-'))
			.filter(|rest| {
				let name = rest.split_once('=').map_or(*rest, |(name, _)| name);
				long_flags.contains(&name)
			})
			.map(|rest| OsString::from(format!("--{rest}")));

		normalized.push(rewritten.unwrap_or(arg));
	}

	normalized
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks warn, info, or debug.
pub fn init_logging(verbosity: u8) {
	let default_level = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	// A subscriber may already be set (e.g. in tests).
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(list: &[&str]) -> Vec<OsString> {
		list.iter().map(OsString::from).collect()
	}

	#[test]
	fn test_single_dash_long_flags_rewritten() {
		let normalized = normalize_long_flags(
			args(&["copy-rules", "-csv", "rules.csv", "-old=A", "-new", "B"]),
			&["csv", "old", "new"],
		);
		assert_eq!(
			normalized,
			args(&["copy-rules", "--csv", "rules.csv", "--old=A", "--new", "B"])
		);
	}

	#[test]
	fn test_other_arguments_untouched() {
		let normalized = normalize_long_flags(
			args(&["copy-rules", "-v", "--csv", "-x.csv", "-h"]),
			&["csv"],
		);
		assert_eq!(
			normalized,
			args(&["copy-rules", "-v", "--csv", "-x.csv", "-h"])
		);
	}

	#[test]
	fn test_values_after_double_dash_untouched() {
		let normalized =
			normalize_long_flags(args(&["tool", "--", "-csv"]), &["csv"]);
		assert_eq!(normalized, args(&["tool", "--", "-csv"]));
	}
}
