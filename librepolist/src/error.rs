//! Error types for Repolist

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepolistError>;

#[derive(Error, Debug)]
pub enum RepolistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RepolistError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RepolistError::InvalidInput(_) => 3,
            RepolistError::Config(_) => 2,
            RepolistError::Fetch(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failure of a single page fetch.
///
/// The `Display` output of these variants is exactly what ends up in
/// `FetchState::Error`, so the formats here are part of the observable
/// contract: a non-2xx response reads `Error 404: Not Found`, anything that
/// failed before an HTTP status was obtained (or while decoding the body)
/// reads `Exception: <cause>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Error {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Exception: {0}")]
    Exception(String),
}
