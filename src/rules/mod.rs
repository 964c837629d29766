//! Row selection and label rewriting.
//!
//! Two label-matching strategies exist and each tool picks one:
//! - exact `key:value` matching inside a scope string ([`ScopeRewriter`])
//! - whole-word matching inside free-form label fields ([`WordLabel`])

pub mod labels;
pub mod policy;
pub mod scope;

pub use labels::WordLabel;
pub use policy::{AdditionalRules, Relabel, RulesetCopy, ScopeMatch, ScopeReplace, rename_ruleset};
pub use scope::{Scope, ScopeRewrite, ScopeRewriter};
