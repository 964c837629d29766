//! Ruleset tools - transform firewall ruleset CSV exports.
//!
//! This library provides the building blocks for the `copy-rules` and
//! `replace-ruleset` binaries:
//! - Header indexing and CSV input/output
//! - Scope-string rewriting and whole-word label matching
//! - Row selection policies for copying and relabeling rules
//! - Config file cascade and interactive prompts
//!
//! # Example
//!
//! ```no_run
//! use ruleset_tools::rules::ScopeRewriter;
//!
//! let rewriter = ScopeRewriter {
//!     app_key: "app".to_string(),
//!     app_filter: None,
//!     match_key: None,
//!     old_value: "prod".to_string(),
//!     new_value: "stage".to_string(),
//! };
//!
//! let result = rewriter.rewrite("app:web;env:prod");
//! assert_eq!(result.scope, "app:web;env:stage");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod rules;
pub mod table;

pub use error::{Result, RulesetError};
