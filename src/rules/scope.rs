use std::fmt;

/// One `;`-separated entry of a scope string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScopeEntry {
	/// Text written back on serialisation.
	raw: String,

	/// Trimmed `(key, value)` if the entry contains a `:`.
	pair: Option<(String, String)>,
}

impl ScopeEntry {
	fn parse(raw: &str) -> Self {
		let pair = raw
			.split_once(':')
			.map(|(key, value)| (key.trim().to_string(), value.trim().to_string()));
		ScopeEntry {
			raw: raw.to_string(),
			pair,
		}
	}
}

/// A parsed `key1:value1;key2:value2` scope string.
///
/// Entry order is preserved. Entries without a colon are kept verbatim and
/// never match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
	entries: Vec<ScopeEntry>,
}

impl Scope {
	/// Parse a scope string. An empty string yields one empty, non-matching entry.
	pub fn parse(input: &str) -> Self {
		Scope {
			entries: input.split(';').map(ScopeEntry::parse).collect(),
		}
	}

	/// Iterate over the well-formed `(key, value)` pairs.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.filter_map(|e| e.pair.as_ref())
			.map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Whether a pair with key `app_key` has value `label`.
	pub fn has_app_label(&self, app_key: &str, label: &str) -> bool {
		self.pairs().any(|(k, v)| k == app_key && v == label)
	}

	/// Replace every value equal to `old` with `new`, optionally only under
	/// `key`. Returns true if at least one pair changed.
	pub fn replace_value(&mut self, key: Option<&str>, old: &str, new: &str) -> bool {
		let mut modified = false;
		for entry in &mut self.entries {
			let Some((ref k, ref mut v)) = entry.pair else {
				continue;
			};
			if v.as_str() != old || key.is_some_and(|wanted| wanted != k.as_str()) {
				continue;
			}
			*v = new.to_string();
			entry.raw = format!("{k}:{new}");
			modified = true;
		}
		modified
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, entry) in self.entries.iter().enumerate() {
			if i > 0 {
				f.write_str(";")?;
			}
			f.write_str(&entry.raw)?;
		}
		Ok(())
	}
}

/// Exact-value scope rewrite: the label-matching strategy of `replace-ruleset`.
#[derive(Debug, Clone)]
pub struct ScopeRewriter {
	/// Scope key holding the application label.
	pub app_key: String,

	/// Application label the scope must carry; `None` accepts every scope.
	pub app_filter: Option<String>,

	/// Only replace values under this key; `None` replaces under any key.
	pub match_key: Option<String>,

	pub old_value: String,
	pub new_value: String,
}

/// Result of rewriting one scope string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRewrite {
	/// The re-serialised scope.
	pub scope: String,

	/// At least one pair had its value replaced.
	pub modified: bool,

	/// The app filter matched (always true without a filter).
	pub app_matched: bool,
}

impl ScopeRewriter {
	pub fn rewrite(&self, scope: &str) -> ScopeRewrite {
		let mut parsed = Scope::parse(scope);

		let app_matched = match self.app_filter {
			Some(ref label) => parsed.has_app_label(&self.app_key, label),
			None => true,
		};
		let modified =
			parsed.replace_value(self.match_key.as_deref(), &self.old_value, &self.new_value);

		ScopeRewrite {
			scope: parsed.to_string(),
			modified,
			app_matched,
		}
	}
}
