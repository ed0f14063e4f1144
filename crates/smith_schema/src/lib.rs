//! # smith_schema
//!
//! Node rules for nodesmith: the data model, rule providers, rule file loading,
//! and rule set validation.
//!
//! A [`Rule`] describes one node type: which attributes it may carry, what
//! content it permits, and which child node types may follow it in which
//! numbers. Rules are looked up by name through a [`RuleProvider`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use smith_schema::{RuleProvider, RuleReader, RuleValidator};
//!
//! let rules = RuleReader::load("./rules.yaml").unwrap();
//!
//! let result = RuleValidator::validate_provider(&rules);
//! if !result.valid {
//!     for error in &result.errors {
//!         eprintln!("Error: {}", error);
//!     }
//! }
//!
//! for name in rules.node_type_names() {
//!     println!("{}", name);
//! }
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod reader;
pub mod validator;

pub use error::{SchemaError, SchemaResult};
pub use models::*;
pub use provider::{RuleProvider, RuleSet};
pub use reader::{RuleFormat, RuleReader};
pub use validator::{RuleValidator, ValidationResult};
