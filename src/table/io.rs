use crate::error::{Result, RulesetError};
use crate::table::Record;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A fully loaded CSV export: one header row plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
	pub header: Record,
	pub rows: Vec<Record>,
}

/// Read a CSV file into memory.
///
/// Rows must all have the header's width. A file without data rows is
/// reported as [`RulesetError::EmptyInput`].
pub fn read_table(path: &Path) -> Result<Table> {
	let file = File::open(path).map_err(|source| RulesetError::InputOpen {
		path: path.to_path_buf(),
		source,
	})?;

	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.from_reader(file);

	let mut records = Vec::new();
	for result in reader.records() {
		let record = result.map_err(|source| RulesetError::CsvRead {
			path: path.to_path_buf(),
			source,
		})?;
		records.push(record.iter().map(|field| field.to_string()).collect::<Record>());
	}

	let mut records = records.into_iter();
	let header = records.next().ok_or_else(|| RulesetError::EmptyInput {
		path: path.to_path_buf(),
	})?;
	let rows: Vec<Record> = records.collect();

	if rows.is_empty() {
		return Err(RulesetError::EmptyInput {
			path: path.to_path_buf(),
		});
	}

	debug!(path = %path.display(), columns = header.len(), rows = rows.len(), "read CSV");
	Ok(Table { header, rows })
}

/// Suffix inserted before `.csv` in the output file name.
pub const OUTPUT_SUFFIX: &str = "_new";

/// Derive the output path: `<input without .csv>_new.csv`.
pub fn output_path(input: &Path) -> PathBuf {
	let Some(file_name) = input.file_name() else {
		let mut path = input.as_os_str().to_os_string();
		path.push(format!("{OUTPUT_SUFFIX}.csv"));
		return PathBuf::from(path);
	};

	let mut name = match (input.extension(), input.file_stem()) {
		(Some(ext), Some(stem)) if ext == "csv" => stem.to_os_string(),
		_ => file_name.to_os_string(),
	};
	name.push(format!("{OUTPUT_SUFFIX}.csv"));
	input.with_file_name(name)
}

/// Write a header and rows to a new CSV file, replacing any existing file.
pub fn write_table(path: &Path, header: &[String], rows: &[Record]) -> Result<()> {
	let file = File::create(path).map_err(|source| RulesetError::OutputCreate {
		path: path.to_path_buf(),
		source,
	})?;
	let mut writer = csv::Writer::from_writer(file);

	let write_err = |source| RulesetError::OutputWrite {
		path: path.to_path_buf(),
		source,
	};
	writer.write_record(header).map_err(write_err)?;
	for row in rows {
		writer.write_record(row).map_err(write_err)?;
	}

	writer.flush().map_err(|source| RulesetError::OutputFlush {
		path: path.to_path_buf(),
		source,
	})?;

	info!(path = %path.display(), rows = rows.len(), "wrote CSV");
	Ok(())
}
