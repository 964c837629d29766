use crate::error::{Result, RulesetError};
use crate::table::Record;
use tracing::debug;

/// How header names are compared against the recognised column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
	Exact,
	CaseInsensitive,
}

/// What happens to excluded columns in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeMode {
	/// Keep the column in the header, blank its value in every row.
	Clear,

	/// Remove the column from the header and every row.
	Drop,
}

/// Logical columns the tools know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
	RulesetName,
	SrcLabels,
	DstLabels,
	Scope,
	RulesetScope,
}

impl ColumnRole {
	/// The header name for this role.
	pub fn column_name(&self) -> &'static str {
		match self {
			ColumnRole::RulesetName => "ruleset_name",
			ColumnRole::SrcLabels => "src_labels",
			ColumnRole::DstLabels => "dst_labels",
			ColumnRole::Scope => "scope",
			ColumnRole::RulesetScope => "ruleset_scope",
		}
	}

	const ALL: [ColumnRole; 5] = [
		ColumnRole::RulesetName,
		ColumnRole::SrcLabels,
		ColumnRole::DstLabels,
		ColumnRole::Scope,
		ColumnRole::RulesetScope,
	];
}

/// Columns dropped or cleared in every emitted row.
pub const EXCLUDED_COLUMNS: [&str; 3] = ["ruleset_href", "rule_href", "href"];

/// Header handling for one tool.
#[derive(Debug, Clone, Copy)]
pub struct HeaderPolicy {
	pub matching: HeaderMatch,
	pub exclude_mode: ExcludeMode,
}

/// Role-to-position mapping computed once from a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
	positions: [Option<usize>; 5],
	excluded: Vec<usize>,
	exclude_mode: ExcludeMode,
	width: usize,
}

impl ColumnIndex {
	/// Index a header. When a name repeats, the last matching column wins.
	pub fn build(header: &[String], policy: &HeaderPolicy) -> Self {
		let matches = |name: &str, wanted: &str| match policy.matching {
			HeaderMatch::Exact => name == wanted,
			HeaderMatch::CaseInsensitive => name.eq_ignore_ascii_case(wanted),
		};

		let mut positions = [None; 5];
		for role in ColumnRole::ALL {
			positions[role as usize] = header
				.iter()
				.rposition(|h| matches(h.as_str(), role.column_name()));
		}

		let excluded: Vec<usize> = header
			.iter()
			.enumerate()
			.filter(|(_, h)| EXCLUDED_COLUMNS.iter().any(|e| matches(h.as_str(), *e)))
			.map(|(i, _)| i)
			.collect();

		debug!(?positions, ?excluded, width = header.len(), "indexed header");

		ColumnIndex {
			positions,
			excluded,
			exclude_mode: policy.exclude_mode,
			width: header.len(),
		}
	}

	/// Position of a role, if the header has it.
	pub fn position(&self, role: ColumnRole) -> Option<usize> {
		self.positions[role as usize]
	}

	/// Position of a role that the tool cannot run without.
	pub fn require(&self, role: ColumnRole) -> Result<usize> {
		self.position(role).ok_or_else(|| RulesetError::MissingColumn {
			column: role.column_name().to_string(),
		})
	}

	/// Positions of `src_labels` and `dst_labels`, which are required together.
	pub fn require_labels(&self) -> Result<(usize, usize)> {
		match (
			self.position(ColumnRole::SrcLabels),
			self.position(ColumnRole::DstLabels),
		) {
			(Some(src), Some(dst)) => Ok((src, dst)),
			_ => Err(RulesetError::MissingColumn {
				column: "src_labels or dst_labels".to_string(),
			}),
		}
	}

	pub fn is_excluded(&self, position: usize) -> bool {
		self.excluded.contains(&position)
	}

	/// Number of fields in the header this index was built from.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Apply the exclusion set to a header.
	pub fn project_header(&self, header: &[String]) -> Record {
		match self.exclude_mode {
			ExcludeMode::Clear => header.to_vec(),
			ExcludeMode::Drop => self.drop_excluded(header.to_vec()),
		}
	}

	/// Apply the exclusion set to a row.
	pub fn project_row(&self, mut row: Record) -> Record {
		match self.exclude_mode {
			ExcludeMode::Clear => {
				for &i in &self.excluded {
					if let Some(field) = row.get_mut(i) {
						field.clear();
					}
				}
				row
			}
			ExcludeMode::Drop => self.drop_excluded(row),
		}
	}

	fn drop_excluded(&self, record: Record) -> Record {
		record
			.into_iter()
			.enumerate()
			.filter(|(i, _)| !self.is_excluded(*i))
			.map(|(_, field)| field)
			.collect()
	}
}
