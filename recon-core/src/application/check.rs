// recon-core/src/application/check.rs

use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::domain::test_case::TestCase;
use crate::error::ReconError;
use crate::ports::connector::SqlDriver;

const MAX_PARALLEL_CHECKS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Ready for comparison.
    Valid,
    /// Configuration problems, as reported by `description_errors`.
    Invalid(Vec<String>),
    /// A schema could not be read (I/O, connection, SQL).
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: String,
    pub status: CheckStatus,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.status == CheckStatus::Valid
    }
}

/// Checks every test case. Each case runs on its own blocking task: origins
/// share nothing but the read-only environment registry they were built
/// from. Reports come back in input order.
#[instrument(skip_all, fields(count = cases.len()))]
pub async fn check_test_cases(
    cases: Vec<Arc<TestCase>>,
    driver: Arc<dyn SqlDriver>,
) -> Result<Vec<CheckReport>, ReconError> {
    let start = Instant::now();

    let tasks = cases.into_iter().map(|case| {
        let driver = driver.clone();
        tokio::task::spawn_blocking(move || check_one(&case, driver.as_ref()))
    });

    let joined: Vec<_> = futures::stream::iter(tasks)
        .buffered(MAX_PARALLEL_CHECKS)
        .collect()
        .await;

    let mut reports = Vec::with_capacity(joined.len());
    for result in joined {
        let report =
            result.map_err(|e| ReconError::InternalError(format!("Check task failed: {}", e)))?;
        reports.push(report);
    }

    let invalid = reports.iter().filter(|r| !r.is_valid()).count();
    info!(
        checked = reports.len(),
        invalid,
        "Checks finished in {:.2?}",
        start.elapsed()
    );
    Ok(reports)
}

/// Synchronous check of a single test case.
pub fn check_one(case: &TestCase, driver: &dyn SqlDriver) -> CheckReport {
    let status = match case.description_errors(driver) {
        Ok(errors) if errors.is_empty() => CheckStatus::Valid,
        Ok(errors) => CheckStatus::Invalid(errors),
        Err(e) => {
            warn!(test = case.name(), error = %e, "Could not read schemas");
            CheckStatus::Failed(e.to_string())
        }
    };
    CheckReport {
        name: case.name().to_string(),
        status,
    }
}
