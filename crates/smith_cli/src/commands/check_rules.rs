//! Check-rules command - Validate a rule set.

use anyhow::Result;
use clap::Args;
use tracing::info;

use smith_schema::RuleValidator;

use super::{report, RulesArgs, ValidationFailed};

#[derive(Args)]
pub struct CheckRulesArgs {
    #[command(flatten)]
    rules: RulesArgs,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

pub fn execute(args: CheckRulesArgs) -> Result<()> {
    let rules = args.rules.load()?;
    info!("Checking {} rules from {:?}", rules.len(), args.rules.rules);

    println!("📋 Checking {} node types...", rules.len());
    let result = RuleValidator::validate_provider(&rules);
    report(&result);

    let failures = if args.strict {
        result.errors.len() + result.warnings.len()
    } else {
        result.errors.len()
    };
    if failures > 0 {
        return Err(ValidationFailed(failures).into());
    }

    println!();
    println!("✅ Rules are consistent");
    Ok(())
}
