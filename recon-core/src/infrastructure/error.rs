// recon-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(recon::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Unable to connect to '{target}': {reason}")]
    #[diagnostic(
        code(recon::infra::database::connection),
        help("Check the server/database of the environment in the settings file.")
    )]
    Connection { target: String, reason: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(recon::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / JSON / YAML ---
    #[error("JSON Parsing Error in {path}: {source}")]
    #[diagnostic(code(recon::infra::json), help("Check your JSON syntax."))]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(recon::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(recon::infra::config))]
    ConfigError(String),

    #[error("{0}")]
    #[diagnostic(code(recon::infra::config_missing))]
    ConfigNotFound(String),

    // --- DATA ---
    #[error("CSV Error: {0}")]
    #[diagnostic(code(recon::infra::csv))]
    Csv(#[from] csv::Error),
}

// Shortcut for `?` on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
