use crate::error::{Result, RulesetError};
use regex::{NoExpand, Regex};

/// Whole-word label matching over free-form label fields.
///
/// Label fields may join several tokens with spaces or commas, so `db` must
/// match `app:db env:prod` but not `app:db2`.
#[derive(Debug, Clone)]
pub struct WordLabel {
	label: String,
	pattern: Regex,
}

impl WordLabel {
	pub fn new(label: &str) -> Result<Self> {
		if label.is_empty() {
			return Err(RulesetError::EmptyLabel {
				what: "Original label".to_string(),
			});
		}

		let pattern_str = format!(r"\b{}\b", regex::escape(label));
		let pattern = Regex::new(&pattern_str).map_err(|source| RulesetError::InvalidLabel {
			label: label.to_string(),
			source,
		})?;

		Ok(WordLabel {
			label: label.to_string(),
			pattern,
		})
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn is_match(&self, field: &str) -> bool {
		self.pattern.is_match(field)
	}

	/// Replace every whole-word occurrence; `replacement` is taken literally.
	pub fn replace_all(&self, field: &str, replacement: &str) -> String {
		self.pattern
			.replace_all(field, NoExpand(replacement))
			.into_owned()
	}
}
