use std::path::PathBuf;

use thiserror::Error;

use crate::{
    auth::AuthError, client::ClientError, configuration::ConfigurationError,
    endpoints::RegistryError, exit_codes::AppExitCode,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// A `--param` value that is not of the form `key=value`
    #[error("Invalid parameter '{0}'. Expected format: key=value")]
    InvalidParameter(String),
    #[error("Parameter '{0}' was given more than once")]
    DuplicateParameter(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Unknown endpoint name
    #[error("{0}")]
    EndpointError(#[from] RegistryError),
    #[error("{0}")]
    AuthenticationError(#[from] AuthError),
    /// Timeouts, transport failures and non-success responses in raw mode
    #[error("{0}")]
    RequestError(#[from] ClientError),
    /// A diagnostic-mode call completed with a non-success status
    #[error("Request failed with status {status}")]
    UnsuccessfulStatus { status: u16 },
    #[error("Configuration file {0:?} already exists, use --force to overwrite it")]
    ConfigurationExists(PathBuf),
    #[error("Failed to write output to {path:?}: {cause}")]
    OutputError {
        path: PathBuf,
        cause: std::io::Error,
    },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> AppExitCode {
        AppExitCode::Failure
    }
}
