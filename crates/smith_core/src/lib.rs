//! # smith_core
//!
//! Schema-driven node construction for nodesmith.
//!
//! Given a node-type name, the [`NodeConstructor`] resolves the type's rule,
//! creates a [`Node`], and fills it in a fixed order: attributes, content,
//! then children. Children are constructed the same way, honoring the
//! minimum and maximum occurrences and choice groups of every child group,
//! until the tree is complete.
//!
//! # Architecture
//!
//! - **Prompter**: where answers come from and narration goes to
//! - **Fillers**: attribute, content, and child elicitation
//! - **Constructor**: drives the fillers over an explicit frame stack
//! - **Validator**: checks finished trees against their rules
//! - **Export**: renders, saves, and loads trees
//!
//! # Example
//!
//! ```rust,no_run
//! use smith_core::{LinePrompter, NodeConstructor, NodeExport, NodeFormat};
//! use smith_schema::RuleReader;
//!
//! let rules = RuleReader::load("./rules.yaml")?;
//! let mut prompter = LinePrompter::stdio();
//!
//! let node = NodeConstructor::new(&rules, &mut prompter).construct(Some("dataset"))?;
//! println!("{}", NodeExport::render(&node, NodeFormat::Json)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constructor;
pub mod error;
pub mod export;
pub mod fill;
pub mod node;
pub mod prompt;
pub mod validator;

pub use constructor::NodeConstructor;
pub use error::{CoreError, CoreResult};
pub use export::{NodeExport, NodeFormat};
pub use fill::{AttributeFiller, ChildStep, ChildrenFiller, ContentFiller};
pub use node::Node;
pub use prompt::{LinePrompter, Prompter};
pub use validator::NodeValidator;
