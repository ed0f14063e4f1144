//! CLI command definitions.
//!
//! This module defines the command structure for the nodesmith CLI.
//! Each subcommand works against a rule file or a directory of rule files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use smith_core::NodeFormat;
use smith_schema::{RuleReader, RuleSet};

pub mod check_rules;
pub mod create;
pub mod list;
pub mod shell;
pub mod validate;

/// nodesmith - build rule-checked document trees interactively
#[derive(Parser)]
#[command(name = "nodesmith")]
#[command(version, about = "nodesmith - build rule-checked document trees interactively")]
#[command(long_about = r#"
nodesmith assembles hierarchical documents one node at a time. Every node
type is described by a rule: which attributes it takes, what content it
permits, and which children it may hold and how many times.

COMMANDS:
  list          → List the node types a rule set defines
  check-rules   → Check a rule set for mistakes
  create        → Build a node, prompting for everything its rules ask for
  validate      → Check a stored node against its rules
  shell         → Interactive menu: create, view, load and save nodes

RULES:
  Pass --rules <PATH> or set NODESMITH_RULES. PATH is a .yaml, .yml, .json
  or .toml rule file, or a directory of them.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or unknown node type
  3 - Validation failure
  4 - Rule error
  5 - Input exhausted
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors; command output is unaffected
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List known node types
    List(list::ListArgs),

    /// Check a rule set for mistakes
    #[command(name = "check-rules")]
    CheckRules(check_rules::CheckRulesArgs),

    /// Build a node interactively
    Create(create::CreateArgs),

    /// Validate a stored node against the rules
    Validate(validate::ValidateArgs),

    /// Run the interactive menu
    Shell(shell::ShellArgs),
}

/// Where to load rules from.
#[derive(Args)]
pub struct RulesArgs {
    /// Rule file or directory of rule files
    #[arg(short, long, env = "NODESMITH_RULES")]
    pub rules: PathBuf,
}

impl RulesArgs {
    pub fn load(&self) -> Result<RuleSet> {
        RuleReader::load(&self.rules)
            .with_context(|| format!("Failed to load rules from {:?}", self.rules))
    }
}

/// Output encoding for nodes.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for NodeFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => NodeFormat::Json,
            FormatArg::Yaml => NodeFormat::Yaml,
        }
    }
}

/// Reported when a rule set or node fails validation.
#[derive(Debug, Error)]
#[error("Validation failed with {0} error(s)")]
pub struct ValidationFailed(pub usize);

/// Print a validation outcome the way every command reports it.
pub fn report(result: &smith_schema::ValidationResult) {
    if result.valid {
        println!("   ✅ No errors");
    } else {
        println!("   ❌ Errors:");
        for error in &result.errors {
            println!("      - {}", error);
        }
    }

    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_quiet_only_changes_logging() {
        let command = Cli::command();
        let quiet = command
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        let help = quiet.get_help().unwrap().to_string();
        assert!(help.contains("log"));
        assert!(!help.contains("Suppress"));

        let cli = Cli::try_parse_from(["nodesmith", "list", "--rules", "rules.yaml", "--quiet"])
            .unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }
}
