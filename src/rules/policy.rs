use crate::error::{Result, RulesetError};
use crate::rules::labels::WordLabel;
use crate::rules::scope::ScopeRewriter;
use crate::table::{ColumnIndex, ColumnRole, Record};
use tracing::{debug, warn};

fn field(row: &Record, position: usize) -> &str {
	row.get(position).map(String::as_str).unwrap_or_default()
}

/// Copy every rule of one ruleset under a new ruleset name.
///
/// The copy gets the target name and an empty `ruleset_scope`; every other
/// included column passes through verbatim.
#[derive(Debug)]
pub struct RulesetCopy<'a> {
	index: &'a ColumnIndex,
	ruleset_name: usize,
	ruleset_scope: Option<usize>,
	source: &'a str,
	target: &'a str,
}

impl<'a> RulesetCopy<'a> {
	pub fn new(index: &'a ColumnIndex, source: &'a str, target: &'a str) -> Result<Self> {
		Ok(RulesetCopy {
			index,
			ruleset_name: index.require(ColumnRole::RulesetName)?,
			ruleset_scope: index.position(ColumnRole::RulesetScope),
			source,
			target,
		})
	}

	pub fn apply(&self, row: &Record) -> Option<Record> {
		if field(row, self.ruleset_name) != self.source {
			return None;
		}

		let mut copy = row.clone();
		copy[self.ruleset_name] = self.target.to_string();
		if let Some(scope) = self.ruleset_scope {
			copy[scope].clear();
		}
		Some(self.index.project_row(copy))
	}

	pub fn select(&self, rows: &[Record]) -> Vec<Record> {
		let copied: Vec<Record> = rows.iter().filter_map(|row| self.apply(row)).collect();
		debug!(source = self.source, target = self.target, copied = copied.len(), "ruleset copy");
		copied
	}
}

/// Copy rules from other rulesets whose labels mention an application and an
/// original label, relabeling the original label in both label columns.
#[derive(Debug)]
pub struct AdditionalRules<'a> {
	index: &'a ColumnIndex,
	ruleset_name: usize,
	src_labels: usize,
	dst_labels: usize,
	source: &'a str,
	target: &'a str,
	app_label: &'a str,
	original: WordLabel,
	new_label: &'a str,
}

/// Answers collected for [`AdditionalRules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relabel {
	pub app_label: String,
	pub original_label: String,
	pub new_label: String,
}

impl<'a> AdditionalRules<'a> {
	pub fn new(
		index: &'a ColumnIndex,
		source: &'a str,
		target: &'a str,
		relabel: &'a Relabel,
	) -> Result<Self> {
		let (src_labels, dst_labels) = index.require_labels()?;
		Ok(AdditionalRules {
			index,
			ruleset_name: index.require(ColumnRole::RulesetName)?,
			src_labels,
			dst_labels,
			source,
			target,
			app_label: &relabel.app_label,
			original: WordLabel::new(&relabel.original_label)?,
			new_label: &relabel.new_label,
		})
	}

	fn labels_match(&self, labels: &str) -> bool {
		labels.contains(self.app_label) && self.original.is_match(labels)
	}

	pub fn apply(&self, row: &Record) -> Option<Record> {
		let name = field(row, self.ruleset_name);
		if name == self.source || name == self.target {
			return None;
		}

		let src = field(row, self.src_labels);
		let dst = field(row, self.dst_labels);
		if !self.labels_match(src) && !self.labels_match(dst) {
			return None;
		}

		let mut copy = row.clone();
		copy[self.src_labels] = self.original.replace_all(src, self.new_label);
		copy[self.dst_labels] = self.original.replace_all(dst, self.new_label);
		Some(self.index.project_row(copy))
	}

	pub fn select(&self, rows: &[Record]) -> Vec<Record> {
		let copied: Vec<Record> = rows.iter().filter_map(|row| self.apply(row)).collect();
		debug!(
			app_label = self.app_label,
			original = self.original.label(),
			copied = copied.len(),
			"additional rules"
		);
		copied
	}
}

/// Rename a ruleset after its scope was relabeled: replace the first
/// occurrence of `old` with `new`, or append `duplicate_suffix` if absent.
pub fn rename_ruleset(name: &str, old: &str, new: &str, duplicate_suffix: &str) -> String {
	if name.contains(old) {
		name.replacen(old, new, 1)
	} else {
		format!("{name}{duplicate_suffix}")
	}
}

/// Outcome of applying [`ScopeReplace`] to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMatch {
	/// The rewritten row, if it passed the filter.
	pub row: Option<Record>,

	/// Some scope pair held the old label.
	pub label_found: bool,

	/// The app filter was given and matched.
	pub app_found: bool,
}

/// Relabel a value in the `scope` column of rows carrying an app label.
#[derive(Debug)]
pub struct ScopeReplace<'a> {
	index: &'a ColumnIndex,
	ruleset_name: usize,
	scope: usize,
	rewriter: &'a ScopeRewriter,
	duplicate_suffix: &'a str,
}

impl<'a> ScopeReplace<'a> {
	pub fn new(
		index: &'a ColumnIndex,
		rewriter: &'a ScopeRewriter,
		duplicate_suffix: &'a str,
	) -> Result<Self> {
		Ok(ScopeReplace {
			index,
			scope: index.require(ColumnRole::Scope)?,
			ruleset_name: index.require(ColumnRole::RulesetName)?,
			rewriter,
			duplicate_suffix,
		})
	}

	pub fn apply(&self, row: &Record) -> ScopeMatch {
		let rewrite = self.rewriter.rewrite(field(row, self.scope));
		let app_found = self.rewriter.app_filter.is_some() && rewrite.app_matched;

		if !(rewrite.modified && rewrite.app_matched) {
			return ScopeMatch {
				row: None,
				label_found: rewrite.modified,
				app_found,
			};
		}

		let mut copy = row.clone();
		copy[self.scope] = rewrite.scope;
		copy[self.ruleset_name] = rename_ruleset(
			field(row, self.ruleset_name),
			&self.rewriter.old_value,
			&self.rewriter.new_value,
			self.duplicate_suffix,
		);

		ScopeMatch {
			row: Some(self.index.project_row(copy)),
			label_found: true,
			app_found,
		}
	}

	/// Rewrite every matching row.
	///
	/// Failures are reported independently: an app filter that no scope
	/// carries is checked first, then a label that no scope carries. When both
	/// occur but never in the same row, the result is empty.
	pub fn select(&self, rows: &[Record]) -> Result<Vec<Record>> {
		let mut selected = Vec::new();
		let mut label_found = false;
		let mut app_found = false;

		for row in rows {
			let outcome = self.apply(row);
			label_found |= outcome.label_found;
			app_found |= outcome.app_found;
			selected.extend(outcome.row);
		}

		debug!(
			rewritten = selected.len(),
			label_found, app_found, "scope replace"
		);

		let column = ColumnRole::Scope.column_name().to_string();

		if let Some(ref app_label) = self.rewriter.app_filter
			&& !app_found
		{
			return Err(RulesetError::AppLabelNotFound {
				label: app_label.clone(),
				column,
			});
		}
		if !label_found {
			return Err(RulesetError::LabelNotFound {
				label: self.rewriter.old_value.clone(),
				column,
			});
		}
		if selected.is_empty() {
			warn!("label and application label never occur in the same row");
		}

		Ok(selected)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::table::{ExcludeMode, HeaderMatch, HeaderPolicy};

	fn record(fields: &[&str]) -> Record {
		fields.iter().map(|f| f.to_string()).collect()
	}

	fn index(header: &[&str], matching: HeaderMatch, exclude_mode: ExcludeMode) -> ColumnIndex {
		ColumnIndex::build(
			&record(header),
			&HeaderPolicy {
				matching,
				exclude_mode,
			},
		)
	}

	fn copy_index() -> ColumnIndex {
		index(
			&["ruleset_name", "src_labels", "dst_labels", "ruleset_scope", "ruleset_href"],
			HeaderMatch::Exact,
			ExcludeMode::Clear,
		)
	}

	fn scope_index() -> ColumnIndex {
		index(
			&["href", "ruleset_name", "scope"],
			HeaderMatch::CaseInsensitive,
			ExcludeMode::Drop,
		)
	}

	fn rewriter(app_filter: Option<&str>, old: &str, new: &str) -> ScopeRewriter {
		ScopeRewriter {
			app_key: "app".to_string(),
			app_filter: app_filter.map(str::to_string),
			match_key: None,
			old_value: old.to_string(),
			new_value: new.to_string(),
		}
	}

	#[test]
	fn test_ruleset_copy_renames_and_clears() {
		let index = copy_index();
		let policy = RulesetCopy::new(&index, "A", "B").unwrap();

		let copied = policy.apply(&record(&["A", "app:web", "app:db", "scope1", "http://x"]));
		assert_eq!(copied, Some(record(&["B", "app:web", "app:db", "", ""])));
	}

	#[test]
	fn test_ruleset_copy_skips_other_rulesets() {
		let index = copy_index();
		let policy = RulesetCopy::new(&index, "A", "B").unwrap();

		let rows = vec![
			record(&["A", "s1", "d1", "x", "/1"]),
			record(&["C", "s2", "d2", "y", "/2"]),
			record(&["A", "s3", "d3", "z", "/3"]),
		];
		let copied = policy.select(&rows);

		assert_eq!(copied.len(), 2);
		assert!(copied.iter().all(|r| r[0] == "B" && r[3].is_empty()));
		assert!(copied.iter().all(|r| r.len() == index.width()));
	}

	#[test]
	fn test_ruleset_copy_requires_name_column() {
		let index = index(&["scope"], HeaderMatch::Exact, ExcludeMode::Clear);
		assert!(matches!(
			RulesetCopy::new(&index, "A", "B"),
			Err(RulesetError::MissingColumn { .. })
		));
	}

	#[test]
	fn test_additional_rules_relabel() {
		let index = copy_index();
		let relabel = Relabel {
			app_label: "app:web".to_string(),
			original_label: "prod".to_string(),
			new_label: "stage".to_string(),
		};
		let policy = AdditionalRules::new(&index, "A", "B", &relabel).unwrap();

		let rows = vec![
			// source ruleset is never an additional rule
			record(&["A", "app:web env:prod", "app:db", "", "/1"]),
			record(&["C", "app:web env:prod", "app:db env:prod", "s", "/2"]),
			// whole-word only
			record(&["D", "app:web env:prod2", "app:db", "", "/3"]),
			// app label missing
			record(&["E", "app:api env:prod", "app:db", "", "/4"]),
		];
		let copied = policy.select(&rows);

		assert_eq!(
			copied,
			vec![record(&["C", "app:web env:stage", "app:db env:stage", "s", ""])]
		);
	}

	#[test]
	fn test_additional_rules_match_on_dst() {
		let index = copy_index();
		let relabel = Relabel {
			app_label: "db".to_string(),
			original_label: "db".to_string(),
			new_label: "cache".to_string(),
		};
		let policy = AdditionalRules::new(&index, "A", "B", &relabel).unwrap();

		let copied = policy.apply(&record(&["C", "app:web", "app:db", "", ""]));
		assert_eq!(copied, Some(record(&["C", "app:web", "app:cache", "", ""])));

		assert_eq!(policy.apply(&record(&["C", "app:web", "app:db2", "", ""])), None);
	}

	#[test]
	fn test_rename_ruleset() {
		assert_eq!(rename_ruleset("A-fw", "A", "B", "-duplicate"), "B-fw");
		assert_eq!(rename_ruleset("X-fw", "A", "B", "-duplicate"), "X-fw-duplicate");
		assert_eq!(rename_ruleset("A-A", "A", "B", "-duplicate"), "B-A");
	}

	#[test]
	fn test_scope_replace_rewrites_row() {
		let index = scope_index();
		let rw = rewriter(None, "prod", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let outcome = policy.apply(&record(&["/1", "prod-fw", "app:web;env:prod"]));
		assert_eq!(outcome.row, Some(record(&["stage-fw", "app:web;env:stage"])));
		assert!(outcome.label_found);
	}

	#[test]
	fn test_scope_replace_excludes_app_mismatch() {
		let index = scope_index();
		let rw = rewriter(Some("db"), "prod", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let outcome = policy.apply(&record(&["/1", "fw", "app:web;env:prod"]));
		assert_eq!(outcome.row, None);
		assert!(outcome.label_found);
		assert!(!outcome.app_found);
	}

	#[test]
	fn test_select_app_not_found() {
		let index = scope_index();
		let rw = rewriter(Some("db"), "prod", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let rows = vec![record(&["/1", "fw", "app:web;env:prod"])];
		match policy.select(&rows).unwrap_err() {
			RulesetError::AppLabelNotFound { label, column } => {
				assert_eq!(label, "db");
				assert_eq!(column, "scope");
			}
			other => panic!("Expected AppLabelNotFound, got {other:?}"),
		}
	}

	#[test]
	fn test_select_label_not_found() {
		let index = scope_index();
		let rw = rewriter(Some("web"), "qa", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let rows = vec![record(&["/1", "fw", "app:web;env:prod"])];
		assert!(matches!(
			policy.select(&rows),
			Err(RulesetError::LabelNotFound { .. })
		));
	}

	#[test]
	fn test_select_app_label_checked_before_label() {
		let index = scope_index();
		let rw = rewriter(Some("cache"), "qa", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let rows = vec![record(&["/1", "fw", "app:web;env:prod"])];
		assert!(matches!(
			policy.select(&rows),
			Err(RulesetError::AppLabelNotFound { .. })
		));
	}

	#[test]
	fn test_select_found_in_different_rows() {
		let index = scope_index();
		let rw = rewriter(Some("web"), "prod", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-duplicate").unwrap();

		let rows = vec![
			record(&["/1", "fw1", "app:web;env:dev"]),
			record(&["/2", "fw2", "app:db;env:prod"]),
		];
		assert!(policy.select(&rows).unwrap().is_empty());
	}

	#[test]
	fn test_select_keeps_order_and_width() {
		let index = scope_index();
		let rw = rewriter(Some("web"), "prod", "stage");
		let policy = ScopeReplace::new(&index, &rw, "-dup").unwrap();

		let rows = vec![
			record(&["/1", "web-prod", "app:web;env:prod"]),
			record(&["/2", "db-prod", "app:db;env:prod"]),
			record(&["/3", "edge", "app:web;env:prod;loc:eu"]),
		];
		let selected = policy.select(&rows).unwrap();

		assert_eq!(
			selected,
			vec![
				record(&["web-stage", "app:web;env:stage"]),
				record(&["edge-dup", "app:web;env:stage;loc:eu"]),
			]
		);
	}
}
