//! List command - Show the node types a rule set defines.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::RulesArgs;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    rules: RulesArgs,
}

pub fn execute(args: ListArgs) -> Result<()> {
    let rules = args.rules.load()?;
    info!("Listing {} node types", rules.len());

    for rule in rules.rules() {
        let children: Vec<_> = rule
            .children
            .iter()
            .flat_map(|group| group.names.iter().map(|n| n.as_str()))
            .collect();

        if children.is_empty() {
            println!("{}", rule.name);
        } else {
            println!("{} → {}", rule.name, children.join(", "));
        }
    }

    Ok(())
}
