//! Fillers that populate a node from its rule.
//!
//! Each node is filled in a fixed order: attributes, then content, then
//! children. A rule may declare both content and child groups; both are
//! then elicited.

pub mod attributes;
pub mod children;
pub mod content;

pub use attributes::AttributeFiller;
pub use children::{ChildStep, ChildrenFiller};
pub use content::ContentFiller;
