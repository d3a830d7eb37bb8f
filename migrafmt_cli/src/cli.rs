//! Defines the CLI application

use migrafmt::{FormatError, FormatterKind, ListError, WriterError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Migration directory path
    #[arg(short = 'M', long, env = "MIGRAFMT_DIR", default_value = "./migrations")]
    pub migrations: PathBuf,

    /// Writer configuration file (TOML); command line flags take precedence
    #[arg(long, env = "MIGRAFMT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Render a plan file into migration files
    Render(RenderArgs),

    /// Show supported migration tools and their file naming
    Formats,

    /// List migration files found in the migration directory
    List(ListArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Plan file (YAML)
    #[arg(short = 'p', long)]
    pub plan: PathBuf,

    /// Target migration tool (golang-migrate, goose, flyway, liquibase)
    #[arg(short = 'F', long)]
    pub format: Option<FormatterKind>,

    /// Use this timestamp (YYYYMMDDHHMMSS) instead of the current UTC time
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Replace migration files that already exist
    #[arg(long, default_value = "false")]
    pub allow_overwrite: bool,

    /// Print rendered files instead of writing them
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Copy, Clone)]
pub struct ListArgs {
    /// Migration tool whose naming scheme is matched
    #[arg(short = 'F', long)]
    pub format: Option<FormatterKind>,
}

/// An Error occurred while running a command
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command")]
    UnknownCommand,

    #[error("invalid plan file `{path}`: {source}")]
    InvalidPlanFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("cannot read `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    IoError(std::io::Error),

    #[error(transparent)]
    WriterError(WriterError),

    #[error(transparent)]
    ListError(ListError),

    #[error(transparent)]
    TimeError(time::Error),
}

impl From<WriterError> for CliError {
    fn from(err: WriterError) -> CliError {
        CliError::WriterError(err)
    }
}

impl From<FormatError> for CliError {
    fn from(err: FormatError) -> CliError {
        CliError::WriterError(WriterError::Format(err))
    }
}

impl From<ListError> for CliError {
    fn from(err: ListError) -> CliError {
        CliError::ListError(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> CliError {
        CliError::IoError(err)
    }
}

impl From<time::Error> for CliError {
    fn from(err: time::Error) -> CliError {
        CliError::TimeError(err)
    }
}

impl From<time::error::Parse> for CliError {
    fn from(err: time::error::Parse) -> CliError {
        CliError::TimeError(err.into())
    }
}
