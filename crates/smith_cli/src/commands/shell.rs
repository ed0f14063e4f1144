//! Shell command - Interactive menu for building, viewing, loading and
//! saving nodes.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use smith_core::{
    CoreError, LinePrompter, Node, NodeConstructor, NodeExport, NodeFormat, NodeValidator,
    Prompter,
};
use smith_schema::{RuleSet, SchemaError};

use super::RulesArgs;

const MAIN_MENU: &str = "
nodesmith -- Main Menu

1: Create a new node
2: View node as JSON
3: View node as YAML
4: Load node
5: Save node
6: Exit

Enter your command: ";

#[derive(Args)]
pub struct ShellArgs {
    #[command(flatten)]
    rules: RulesArgs,
}

pub fn execute(args: ShellArgs) -> Result<()> {
    let rules = args.rules.load()?;
    let mut prompter = LinePrompter::stdio();

    prompter.say("\nWelcome to nodesmith")?;
    Shell::new(&rules).run(&mut prompter)?;
    Ok(())
}

/// The menu loop and the node it is working on.
pub struct Shell<'a> {
    rules: &'a RuleSet,
    node: Option<Node>,
}

impl<'a> Shell<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules, node: None }
    }

    /// Run until the user exits. Returns the node being worked on last.
    pub fn run(mut self, prompter: &mut dyn Prompter) -> Result<Option<Node>> {
        loop {
            match prompter.read_choice_in_range(MAIN_MENU, 1, 6)? {
                1 => self.create(prompter)?,
                2 => self.view(prompter, NodeFormat::Json)?,
                3 => self.view(prompter, NodeFormat::Yaml)?,
                4 => self.load(prompter)?,
                5 => self.save(prompter)?,
                _ => {
                    prompter.say("Goodbye!")?;
                    return Ok(self.node);
                }
            }
        }
    }

    fn create(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let result = NodeConstructor::new(self.rules, &mut *prompter).construct(None);
        match result {
            Ok(node) => {
                info!("Shell built {} node", node.name);
                self.node = Some(node);
            }
            Err(CoreError::Schema(SchemaError::UnknownNodeType(name))) => {
                prompter.say(&format!("Sorry, I don't know about a {} node.", name))?;
            }
            Err(CoreError::Schema(e)) => {
                warn!("Construction aborted: {}", e);
                prompter.say(&format!("Construction aborted: {}", e))?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn view(&self, prompter: &mut dyn Prompter, format: NodeFormat) -> Result<()> {
        match &self.node {
            Some(node) => prompter.say(&NodeExport::render(node, format)?)?,
            None => prompter.say("There is currently no node to view")?,
        }
        Ok(())
    }

    fn load(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let path = prompter.read_text("Path to the node file: ")?;
        if path.is_empty() {
            return Ok(());
        }

        let node = match NodeExport::load(&path) {
            Ok(node) => node,
            Err(e) => {
                prompter.say(&format!("Could not load {}: {}", path, e))?;
                return Ok(());
            }
        };

        if let Err(e) = NodeValidator::ensure_complete(&node, self.rules) {
            prompter.say(&format!("Not loaded: {}", e))?;
            return Ok(());
        }

        prompter.say(&format!("Loaded {} node from {}", node.name, path))?;
        self.node = Some(node);
        Ok(())
    }

    fn save(&self, prompter: &mut dyn Prompter) -> Result<()> {
        let Some(node) = &self.node else {
            prompter.say("There is currently no node to save")?;
            return Ok(());
        };

        let choices = vec!["json".to_string(), "yaml".to_string()];
        let extension = prompter.read_text_with_choices("Format as: ", true, &choices)?;
        let format = NodeFormat::from_extension(&extension).unwrap_or(NodeFormat::Json);

        let default_name = NodeExport::default_file_name(node, format);
        let mut file_name = prompter.read_text(&format!(
            "Enter a filename or press return for the default [{}]: ",
            default_name
        ))?;
        if file_name.is_empty() {
            file_name = default_name;
        }

        if let Err(e) = NodeExport::save(node, &file_name, format) {
            warn!("Saving {} node to {} failed: {}", node.name, file_name, e);
            prompter.say(&format!("Could not save {}: {}", file_name, e))?;
            return Ok(());
        }
        prompter.say(&format!("Node {} saved to file {}", node.name, file_name))?;
        Ok(())
    }
}
