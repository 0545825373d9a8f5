//! Casewright CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use casewright::{CasewrightConfig, GenerationMode, OperationMode, WorkbenchError, logging};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), WorkbenchError> {
    let config = load_config()?;
    logging::init(config.log_level.as_deref())?;

    let mut stdout = io::stdout();
    match config.operation_mode() {
        OperationMode::ShowTemplates => cli::templates::run(&mut stdout),
        OperationMode::ValidateRequirement => cli::validate::run(&config, &mut stdout),
        OperationMode::ListStories => {
            let workbench = cli::workbench::build(&config)?;
            cli::stories::run(&workbench, &config, &mut stdout).await
        }
        OperationMode::GenerateFromStory => {
            let workbench = cli::workbench::build(&config)?;
            cli::generate::run(&workbench, &config, GenerationMode::Story, &mut stdout).await
        }
        OperationMode::GenerateFromRequirement => {
            let workbench = cli::workbench::build(&config)?;
            cli::generate::run(&workbench, &config, GenerationMode::Manual, &mut stdout).await
        }
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CasewrightConfig, WorkbenchError> {
    CasewrightConfig::load().map_err(|error| WorkbenchError::Configuration {
        message: error.to_string(),
    })
}
