//! Command line entry point: checks storage snapshots and inspects texts.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use translation_guard::Text;
use translation_guard::config::{
    ConfigError,
    ConfigManager,
};
use translation_guard::consistency::detect_variables;
use translation_guard::snapshot::{
    Snapshot,
    SnapshotError,
};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "translation-guard")]
#[command(version)]
#[command(about = "Keeps translations consistent with their primary locale")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate every translation of a snapshot file
    Check {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory containing .translation-guard.json
        #[arg(short, long, value_name = "DIR")]
        workspace: Option<PathBuf>,

        /// Overrides the configured primary locale
        #[arg(short, long, value_name = "CODE")]
        primary_locale: Option<String>,
    },

    /// Print the substitution variables of a text
    Variables {
        /// Text to inspect
        #[arg(value_name = "TEXT")]
        text: String,

        /// Parse the text as a YAML literal, such as a plural map
        #[arg(long)]
        yaml: bool,
    },
}

/// Errors reported by the binary.
#[derive(Error, Debug)]
enum CliError {
    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unreadable snapshot.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Malformed `--yaml` literal.
    #[error("Failed to parse YAML literal: {0}")]
    Literal(#[from] serde_yaml::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check { file, workspace, primary_locale } => {
            check(&file, workspace.as_deref(), primary_locale)
        }
        Commands::Variables { text, yaml } => variables(&text, yaml),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the `check` subcommand; fails when any translation is invalid.
fn check(
    file: &Path,
    workspace: Option<&Path>,
    primary_locale: Option<String>,
) -> Result<ExitCode, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(workspace)?;
    if let Some(primary_locale) = primary_locale {
        config_manager.override_primary_locale(primary_locale)?;
    }

    let snapshot = Snapshot::load(file)?;
    let findings = snapshot.check(config_manager.get_settings());

    let mut out = io::stdout().lock();
    for finding in &findings {
        writeln!(out, "{finding}")?;
    }

    if findings.is_empty() {
        tracing::info!(phrases = snapshot.len(), "All translations are consistent");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Runs the `variables` subcommand.
fn variables(raw: &str, yaml: bool) -> Result<ExitCode, CliError> {
    let text = if yaml {
        Text::from(serde_yaml::from_str::<serde_yaml::Value>(raw)?)
    } else {
        Text::from(raw)
    };

    let mut out = io::stdout().lock();
    for variable in detect_variables(&text) {
        writeln!(out, "{variable}")?;
    }
    Ok(ExitCode::SUCCESS)
}
