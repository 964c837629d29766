use std::path::PathBuf;

/// Library-level structured errors for the ruleset tools.
///
/// The binaries wrap these with `anyhow` for context chains.
#[derive(Debug, thiserror::Error)]
pub enum RulesetError {
	#[error("Failed to open CSV file: {path}")]
	InputOpen {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read CSV file: {path}")]
	CsvRead {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("CSV file is empty or only contains a header: {path}")]
	EmptyInput { path: PathBuf },

	#[error("{column} column not found in CSV file")]
	MissingColumn { column: String },

	#[error("Failed to create output file: {path}")]
	OutputCreate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output file: {path}")]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("Failed to flush output file: {path}")]
	OutputFlush {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("The specified label was not found in the '{column}' column: {label}")]
	LabelNotFound { label: String, column: String },

	#[error("The specified application label was not found in the '{column}' column: {label}")]
	AppLabelNotFound { label: String, column: String },

	#[error("{what} must not be empty")]
	EmptyLabel { what: String },

	#[error("Invalid label pattern: {label}")]
	InvalidLabel {
		label: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to read input for prompt: {prompt}")]
	PromptFailed {
		prompt: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Input ended before answering prompt: {prompt}")]
	PromptEof { prompt: String },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid config value for {key}: {message}")]
	InvalidConfig { key: String, message: String },
}

/// Result type alias using RulesetError.
pub type Result<T> = std::result::Result<T, RulesetError>;
