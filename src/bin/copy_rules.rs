use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use ruleset_tools::cli::{init_logging, normalize_long_flags};
use ruleset_tools::prompt::Prompter;
use ruleset_tools::rules::{AdditionalRules, Relabel, RulesetCopy};
use ruleset_tools::table::{
	ColumnIndex, ExcludeMode, HeaderMatch, HeaderPolicy, output_path, read_table, write_table,
};

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &["csv", "old", "new"];

#[derive(Parser)]
#[command(name = "copy-rules")]
#[command(
	author,
	version,
	about = "Copy a ruleset in a CSV rule export under a new ruleset name"
)]
struct Cli {
	/// CSV file to process
	#[arg(long, value_name = "PATH")]
	csv: PathBuf,

	/// Old ruleset name to match
	#[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
	old: String,

	/// New ruleset name
	#[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
	new: String,

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
	let table = read_table(&cli.csv)?;
	let index = ColumnIndex::build(
		&table.header,
		&HeaderPolicy {
			matching: HeaderMatch::Exact,
			exclude_mode: ExcludeMode::Clear,
		},
	);

	let copy = RulesetCopy::new(&index, &cli.old, &cli.new)?;
	index.require_labels()?;

	let mut rows = copy.select(&table.rows);
	if rows.is_empty() {
		warn!(ruleset = %cli.old, "no rules found for ruleset");
	}
	println!(
		"Copied {} rules from ruleset '{}' to '{}'.",
		rows.len(),
		cli.old,
		cli.new
	);

	let stdin = io::stdin();
	let mut prompter = Prompter::new(stdin.lock(), io::stdout());

	if prompter.confirm("Do you want to copy and paste additional rules? (Y/n): ")? {
		let relabel = Relabel {
			app_label: prompter.answer("Input the application label to filter: ")?,
			original_label: prompter.required(
				"Input the original label you want to replace: ",
				"Original label",
			)?,
			new_label: prompter.answer("Input the new label: ")?,
		};

		let additional = AdditionalRules::new(&index, &cli.old, &cli.new, &relabel)
			.context("Failed to prepare additional rules")?;
		let extra = additional.select(&table.rows);
		info!(count = extra.len(), "additional rules selected");
		println!("Additional rules copied and modified: {}", extra.len());
		rows.extend(extra);
	} else {
		println!("No additional rules copied.");
	}

	let output = output_path(&cli.csv);
	write_table(&output, &index.project_header(&table.header), &rows)?;

	println!("Processing completed. New file saved as: {}", output.display());
	Ok(ExitCode::SUCCESS)
}
