//! Create command - Build a node from its rules.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use smith_core::{LinePrompter, Node, NodeConstructor, NodeExport, NodeFormat, Prompter};
use smith_schema::RuleSet;

use super::{FormatArg, RulesArgs};

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    rules: RulesArgs,

    /// Node type to build (asked for when omitted)
    #[arg(short = 't', long)]
    node_type: Option<String>,

    /// Read answers from this file, one per line, instead of the terminal
    #[arg(short, long)]
    answers: Option<PathBuf>,

    /// Write the node to this file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (a known output file extension takes precedence)
    #[arg(short, long, value_enum, default_value = "json")]
    format: FormatArg,
}

pub fn execute(args: CreateArgs) -> Result<()> {
    let rules = args.rules.load()?;

    let node = match &args.answers {
        Some(path) => {
            info!("Reading answers from {:?}", path);
            let file = File::open(path)
                .with_context(|| format!("Failed to open answers file {:?}", path))?;
            let mut prompter = LinePrompter::new(BufReader::new(file), io::sink());
            build(&rules, args.node_type.as_deref(), &mut prompter)?
        }
        None => build(&rules, args.node_type.as_deref(), &mut LinePrompter::stdio())?,
    };

    match &args.output {
        Some(path) => {
            let format = NodeFormat::from_path(path).unwrap_or_else(|| args.format.into());
            NodeExport::save(&node, path, format)
                .with_context(|| format!("Failed to write node to {:?}", path))?;
            println!("✅ {} node saved to {}", node.name, path.display());
        }
        None => println!("{}", NodeExport::render(&node, args.format.into())?),
    }

    Ok(())
}

fn build(rules: &RuleSet, node_type: Option<&str>, prompter: &mut dyn Prompter) -> Result<Node> {
    let node = NodeConstructor::new(rules, prompter)
        .construct(node_type)
        .context("Failed to build node")?;
    info!("Built {} node with {} nodes in total", node.name, node.count());
    Ok(node)
}
