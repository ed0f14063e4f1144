//! Validate command - Check a stored node against the rules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use smith_core::{NodeExport, NodeValidator};

use super::{report, RulesArgs, ValidationFailed};

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    rules: RulesArgs,

    /// Node file to validate (.json, .yaml or .yml)
    #[arg(short, long)]
    node: PathBuf,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let rules = args.rules.load()?;
    let node = NodeExport::load(&args.node)
        .with_context(|| format!("Failed to read node from {:?}", args.node))?;
    info!("Validating {} node from {:?}", node.name, args.node);

    println!("📋 Validating {} node ({} nodes in total)...", node.name, node.count());
    let result = NodeValidator::validate(&node, &rules);
    report(&result);

    if !result.valid {
        return Err(ValidationFailed(result.errors.len()).into());
    }

    Ok(())
}
