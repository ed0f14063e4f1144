//! nodesmith CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or unknown node type
//! - 3: Validation failure
//! - 4: Rule error
//! - 5: Input exhausted

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smith_core::CoreError;
use smith_schema::SchemaError;

mod commands;

use commands::{Cli, Commands, ValidationFailed};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const RULE_ERROR: u8 = 4;
    pub const INPUT_EXHAUSTED: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts on stdout
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,smith={}", level)));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(args),
        Commands::CheckRules(args) => commands::check_rules::execute(args),
        Commands::Create(args) => commands::create::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Shell(args) => commands::shell::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.downcast_ref::<ValidationFailed>().is_some() {
            return ExitCodes::VALIDATION_FAILURE;
        }
        if let Some(err) = cause.downcast_ref::<CoreError>() {
            return match err {
                CoreError::Schema(schema) => categorize_schema_error(schema),
                CoreError::InputExhausted => ExitCodes::INPUT_EXHAUSTED,
                CoreError::SchemaIncomplete { .. } => ExitCodes::VALIDATION_FAILURE,
                CoreError::UnsupportedFormat(_) => ExitCodes::INVALID_ARGS,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if let Some(err) = cause.downcast_ref::<SchemaError>() {
            return categorize_schema_error(err);
        }
    }
    ExitCodes::GENERAL_ERROR
}

fn categorize_schema_error(e: &SchemaError) -> u8 {
    match e {
        SchemaError::UnknownNodeType(_) | SchemaError::NotFound(_) => ExitCodes::INVALID_ARGS,
        SchemaError::Io(_) => ExitCodes::GENERAL_ERROR,
        _ => ExitCodes::RULE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_error() {
        let err = anyhow::Error::from(CoreError::InputExhausted);
        assert_eq!(categorize_error(&err), ExitCodes::INPUT_EXHAUSTED);

        let err = anyhow::Error::from(CoreError::from(SchemaError::MalformedRule {
            rule: "group".to_string(),
            message: "bad".to_string(),
        }));
        assert_eq!(categorize_error(&err), ExitCodes::RULE_ERROR);

        let err: anyhow::Result<()> = Err(SchemaError::UnknownNodeType("x".to_string()))
            .context("Failed to build node");
        assert_eq!(categorize_error(&err.unwrap_err()), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::from(ValidationFailed(2));
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);

        assert_eq!(categorize_error(&anyhow::anyhow!("boom")), ExitCodes::GENERAL_ERROR);
    }
}
