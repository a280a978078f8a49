// recon-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ReconError {
    // --- DOMAIN (origins not ready, unknown test cases) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, parsing, database) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ReconError {
    /// Errors that leave nothing sensible to do for the rest of the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReconError::Infrastructure(
                InfrastructureError::ConfigNotFound(_) | InfrastructureError::ConfigError(_)
            )
        )
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        ReconError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for ReconError {
    fn from(err: csv::Error) -> Self {
        ReconError::Infrastructure(InfrastructureError::Csv(err))
    }
}
