// recon-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Origin '{origin}' cannot be read: {reason}")]
    #[diagnostic(
        code(recon::domain::origin_not_ready),
        help("Run `recon check` and fix the reported settings before extracting data.")
    )]
    OriginNotReady { origin: String, reason: String },

    #[error("Test case '{0}' not found")]
    #[diagnostic(code(recon::domain::test_case_not_found))]
    TestCaseNotFound(String),

    #[error("Test case '{name}' is not valid:\n{errors}")]
    #[diagnostic(code(recon::domain::invalid_test_case))]
    InvalidTestCase { name: String, errors: String },
}
