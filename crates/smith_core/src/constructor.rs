//! Node construction driven by rules and human input.

use tracing::{debug, info};

use smith_schema::{RuleProvider, SchemaError};

use crate::error::CoreResult;
use crate::fill::{AttributeFiller, ChildStep, ChildrenFiller, ContentFiller};
use crate::node::Node;
use crate::prompt::Prompter;

/// A node whose attributes and content are filled and whose children are
/// still being elicited.
struct Frame {
    node: Node,
    children: ChildrenFiller,
}

impl Frame {
    fn attach(&mut self, child: Node) {
        debug!("Attaching {} ({}) to {}", child.name, child.id, self.node.name);
        self.node.append_child(child);
        self.children.record_child();
    }
}

/// Builds complete nodes for requested node types.
///
/// Nested children are handled with an explicit stack of frames instead of
/// recursion, so the construction loop does not grow the call stack with
/// schema depth.
pub struct NodeConstructor<'a> {
    rules: &'a dyn RuleProvider,
    prompter: &'a mut dyn Prompter,
}

impl<'a> NodeConstructor<'a> {
    pub fn new(rules: &'a dyn RuleProvider, prompter: &'a mut dyn Prompter) -> Self {
        Self { rules, prompter }
    }

    /// Construct a node of `node_type`, or of a type chosen by the user.
    ///
    /// Each node is filled in the order attributes, content, children. Fails
    /// with `UnknownNodeType` if any requested type has no rule and with
    /// `MalformedRule` if a rule's occurrence bounds cannot be resolved.
    pub fn construct(&mut self, node_type: Option<&str>) -> CoreResult<Node> {
        let node_type = match node_type {
            Some(name) => name.to_string(),
            None => self.choose_node_type()?,
        };
        info!("Constructing {} node", node_type);

        let mut stack: Vec<Frame> = Vec::new();
        let mut current = self.open(&node_type)?;

        loop {
            match current.children.next_step(&mut *self.prompter)? {
                ChildStep::Create(name) => {
                    let child = self.open(&name)?;
                    stack.push(std::mem::replace(&mut current, child));
                }
                ChildStep::Finished => match stack.pop() {
                    Some(mut parent) => {
                        parent.attach(current.node);
                        current = parent;
                    }
                    None => {
                        info!(
                            "Completed {} node with {} descendants",
                            current.node.name,
                            current.node.count() - 1
                        );
                        return Ok(current.node);
                    }
                },
            }
        }
    }

    fn choose_node_type(&mut self) -> CoreResult<String> {
        let names = self.rules.node_type_names();
        self.prompter.read_text_with_choices(
            "Which type of node would you like to build?: ",
            true,
            &names,
        )
    }

    /// Create a node and fill everything but its children.
    fn open(&mut self, node_type: &str) -> CoreResult<Frame> {
        if !self.rules.has_node_type(node_type) {
            return Err(SchemaError::UnknownNodeType(node_type.to_string()).into());
        }
        let rule = self.rules.rule(node_type)?;

        let mut node = Node::new(node_type);
        debug!("Opened {} ({})", node.name, node.id);
        self.prompter.say(&format!(
            "Building a {} node using rule {}.",
            node_type, rule.name
        ))?;

        AttributeFiller::fill(&mut node, &rule, &mut *self.prompter)?;
        ContentFiller::fill(&mut node, &rule, &mut *self.prompter)?;
        let children = ChildrenFiller::new(&rule)?;

        Ok(Frame { node, children })
    }
}
