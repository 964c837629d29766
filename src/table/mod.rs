//! CSV tables and column indexing.
//!
//! Position, not name, is authoritative once a header has been indexed:
//! every row is addressed through the [`ColumnIndex`] built from its header.

pub mod columns;
pub mod io;

/// One CSV row as an ordered list of fields.
pub type Record = Vec<String>;

pub use columns::{
	ColumnIndex, ColumnRole, EXCLUDED_COLUMNS, ExcludeMode, HeaderMatch, HeaderPolicy,
};
pub use io::{OUTPUT_SUFFIX, Table, output_path, read_table, write_table};
