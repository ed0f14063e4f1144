//! Child elicitation: the occurrence and choice state machine.
//!
//! For every child group, in declared order:
//!
//! ```text
//! Start -> capped? ------------------------------> next group
//!       -> count < min ? Mandatory : AskContinue
//!          AskContinue --no---------------------> next group
//!          Mandatory | yes -> choose name -> Create(name) -> (child attached) -> Start
//! ```
//!
//! Declining is only offered once the group's minimum is met, so a finished
//! group always satisfies its bounds.

use tracing::debug;

use smith_schema::{OccurrenceBounds, Rule, SchemaError};

use crate::error::CoreResult;
use crate::prompt::Prompter;

/// What the caller should do next for the node being filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStep {
    /// Construct a child of this type, then report it with
    /// [`ChildrenFiller::record_child`].
    Create(String),
    /// Every child group is done.
    Finished,
}

#[derive(Debug)]
struct GroupState {
    names: Vec<String>,
    bounds: OccurrenceBounds,
    count: usize,
}

/// Cursor over the child groups of one node.
///
/// The filler does not build children itself; it tells the constructor
/// which node type to build next, so nesting depth never grows the call
/// stack.
#[derive(Debug)]
pub struct ChildrenFiller {
    parent: String,
    groups: Vec<GroupState>,
    current: usize,
}

impl ChildrenFiller {
    /// Prepare the cursor for `rule`.
    ///
    /// Every group's bounds are resolved here, so a malformed rule fails
    /// before any child is created.
    pub fn new(rule: &Rule) -> CoreResult<Self> {
        let bounds = rule.child_bounds()?;

        let mut groups = Vec::with_capacity(bounds.len());
        for (index, (group, bounds)) in rule.children.iter().zip(bounds).enumerate() {
            if group.names.is_empty() {
                return Err(SchemaError::MalformedRule {
                    rule: rule.name.clone(),
                    message: format!("child group {} has no candidate node types", index),
                }
                .into());
            }
            groups.push(GroupState {
                names: group.names.clone(),
                bounds,
                count: 0,
            });
        }

        Ok(Self {
            parent: rule.name.clone(),
            groups,
            current: 0,
        })
    }

    /// Advance the state machine to the next child to create, if any.
    pub fn next_step(&mut self, prompter: &mut dyn Prompter) -> CoreResult<ChildStep> {
        while let Some(group) = self.groups.get_mut(self.current) {
            if group.bounds.is_capped(group.count) {
                debug!(
                    "Child group {} of {} reached its maximum of {}",
                    self.current, self.parent, group.count
                );
                self.current += 1;
                continue;
            }

            prompter.say(&format!(
                "{} may have the following child nodes: {}",
                self.parent,
                group.names.join(", ")
            ))?;

            let proceed = if group.count < group.bounds.min {
                true
            } else {
                let word = if group.count > 0 { "another" } else { "a" };
                prompter.read_yes_no(&format!("Create {} child node for {}?", word, self.parent))?
            };

            if !proceed {
                debug!(
                    "Child group {} of {} closed with {} children",
                    self.current, self.parent, group.count
                );
                self.current += 1;
                continue;
            }

            let name = if group.names.len() > 1 {
                loop {
                    let choice = prompter.read_text_with_choices(
                        &format!("Choose a child for {}: ", self.parent),
                        true,
                        &group.names,
                    )?;
                    if group.names.contains(&choice) {
                        break choice;
                    }
                }
            } else {
                group.names[0].clone()
            };

            return Ok(ChildStep::Create(name));
        }

        Ok(ChildStep::Finished)
    }

    /// Count a completed child against the current group.
    pub fn record_child(&mut self) {
        if let Some(group) = self.groups.get_mut(self.current) {
            group.count += 1;
        }
    }

    /// Children counted so far, per group.
    pub fn counts(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;
    use smith_schema::{ChildGroup, MaxOccurrences};

    /// Drive the cursor as the constructor would, without building children.
    fn drive(filler: &mut ChildrenFiller, prompter: &mut dyn Prompter) -> Vec<String> {
        let mut created = Vec::new();
        while let ChildStep::Create(name) = filler.next_step(prompter).unwrap() {
            created.push(name);
            filler.record_child();
        }
        created
    }

    #[test]
    fn test_mandatory_children_need_no_prompt() {
        let rule = Rule::new("pair").with_children(ChildGroup::new(["leaf"], 2, Some(2)));
        let mut filler = ChildrenFiller::new(&rule).unwrap();
        let mut prompter = LinePrompter::scripted(Vec::<String>::new());

        assert_eq!(drive(&mut filler, &mut prompter), vec!["leaf", "leaf"]);
        assert_eq!(filler.counts(), vec![2]);
    }

    #[test]
    fn test_optional_children_stop_on_decline() {
        let rule = Rule::new("list").with_children(ChildGroup::new(["item"], 1, None));
        let mut filler = ChildrenFiller::new(&rule).unwrap();
        let mut prompter = LinePrompter::scripted(["y", "yes", "n"]);

        assert_eq!(drive(&mut filler, &mut prompter).len(), 3);
    }

    #[test]
    fn test_cap_is_never_exceeded() {
        let rule = Rule::new("group").with_children(ChildGroup::new(["leaf"], 0, Some(2)));
        let mut filler = ChildrenFiller::new(&rule).unwrap();
        let mut prompter = LinePrompter::scripted(["y", "y", "y", "y"]);

        assert_eq!(drive(&mut filler, &mut prompter).len(), 2);
    }

    #[test]
    fn test_choice_group() {
        let rule = Rule::new("either").with_children(ChildGroup::new(["x", "y"], 1, Some(1)));
        let mut filler = ChildrenFiller::new(&rule).unwrap();
        let mut prompter = LinePrompter::scripted(["z", "y"]);

        assert_eq!(drive(&mut filler, &mut prompter), vec!["y"]);
    }

    #[test]
    fn test_groups_are_processed_in_order() {
        let rule = Rule::new("doc")
            .with_children(ChildGroup::new(["title"], 1, Some(1)))
            .with_children(ChildGroup::new(["para"], 0, None))
            .with_children(ChildGroup::new(["footer"], 0, Some(1)));
        let mut filler = ChildrenFiller::new(&rule).unwrap();
        let mut prompter = LinePrompter::scripted(["y", "n", "y"]);

        assert_eq!(drive(&mut filler, &mut prompter), vec!["title", "para", "footer"]);
        assert_eq!(filler.counts(), vec![1, 1, 1]);
    }

    #[test]
    fn test_malformed_bound_fails_up_front() {
        let rule = Rule::new("group")
            .with_children(ChildGroup::new(["leaf"], 1, Some(1)))
            .with_children(
                ChildGroup::new(["leaf"], 0, None).with_max(MaxOccurrences::Text("abc".into())),
            );

        let err = ChildrenFiller::new(&rule).unwrap_err();
        assert!(err.is_malformed_rule());
    }

    #[test]
    fn test_empty_group_is_malformed() {
        let rule = Rule::new("group").with_children(ChildGroup::new(Vec::<String>::new(), 0, None));
        assert!(ChildrenFiller::new(&rule).unwrap_err().is_malformed_rule());
    }
}
