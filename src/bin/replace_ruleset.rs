use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use ruleset_tools::cli::{init_logging, normalize_long_flags};
use ruleset_tools::config::load_settings;
use ruleset_tools::prompt::Prompter;
use ruleset_tools::rules::{ScopeReplace, ScopeRewriter};
use ruleset_tools::table::{
	ColumnIndex, ColumnRole, ExcludeMode, HeaderMatch, HeaderPolicy, output_path, read_table,
	write_table,
};

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &["input", "key"];

#[derive(Parser)]
#[command(name = "replace-ruleset")]
#[command(
	author,
	version,
	about = "Replace a label in the scope column of a CSV ruleset export"
)]
struct Cli {
	/// Input CSV file
	#[arg(long, value_name = "PATH")]
	input: PathBuf,

	/// Only replace values stored under this scope key
	#[arg(long, value_name = "KEY", value_parser = NonEmptyStringValueParser::new())]
	key: Option<String>,

	/// Increase log verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> ExitCode {
	let cli = Cli::parse_from(normalize_long_flags(std::env::args_os(), LONG_FLAGS));
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let settings = load_settings(&cwd).context("Failed to load configuration")?;

	let table = read_table(&cli.input)?;
	let index = ColumnIndex::build(
		&table.header,
		&HeaderPolicy {
			matching: HeaderMatch::CaseInsensitive,
			exclude_mode: ExcludeMode::Drop,
		},
	);
	index.require(ColumnRole::Scope)?;
	index.require(ColumnRole::RulesetName)?;

	let stdin = io::stdin();
	let mut prompter = Prompter::new(stdin.lock(), io::stdout());

	let app_filter =
		prompter.optional("Enter the application label to filter (press Enter to skip): ")?;
	let old_value = prompter.required("The label needs to be replaced: ", "Label to replace")?;
	let new_value = prompter.required("The new label: ", "New label")?;

	let rewriter = ScopeRewriter {
		app_key: settings.app_key.clone(),
		app_filter,
		match_key: cli.key,
		old_value,
		new_value,
	};
	let policy = ScopeReplace::new(&index, &rewriter, &settings.duplicate_suffix)?;
	let rows = policy.select(&table.rows)?;
	info!(count = rows.len(), "rows rewritten");

	let output = output_path(&cli.input);
	write_table(&output, &index.project_header(&table.header), &rows)?;

	println!("New CSV file created successfully: {}", output.display());
	Ok(ExitCode::SUCCESS)
}
