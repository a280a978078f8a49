// recon-core/src/infrastructure/config/test_cases.rs

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::environment::EnvironmentRegistry;
use crate::domain::error::DomainError;
use crate::domain::test_case::TestCase;
use crate::error::ReconError;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_EXTENSION: &str = "json";

/// All test cases found in a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct TestCaseRegistry {
    cases: Vec<TestCase>,
}

impl TestCaseRegistry {
    /// Loads every `*.json` file (any case) directly inside `dir`, one test
    /// case per file, named after the file stem.
    ///
    /// Correctness of the descriptions is not checked here; use
    /// [`TestCase::description_errors`]. A file that is not valid JSON aborts
    /// the whole load. Files are taken in file name order.
    #[instrument(skip(environments))]
    pub fn discover_and_load(
        dir: &Path,
        environments: &EnvironmentRegistry,
    ) -> Result<Self, ReconError> {
        if !dir.is_dir() {
            return Err(InfrastructureError::ConfigNotFound(format!(
                "Folder {} not found. Unable to read testing config files",
                dir.display()
            ))
            .into());
        }

        let mut cases = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
            let path = entry.path();
            let is_config = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(CONFIG_EXTENSION));
            if !is_config {
                debug!(path = %path.display(), "Skipping non-config entry");
                continue;
            }

            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default();
            let content = fs::read_to_string(path).map_err(InfrastructureError::Io)?;
            let description: Value =
                serde_json::from_str(&content).map_err(|source| InfrastructureError::Json {
                    path: path.display().to_string(),
                    source,
                })?;

            cases.push(TestCase::new(name, description, environments)?);
        }

        info!(count = cases.len(), "Test cases loaded");
        Ok(Self { cases })
    }

    pub fn all(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn find(&self, name: &str) -> Result<&TestCase, DomainError> {
        self.cases
            .iter()
            .find(|case| case.name() == name)
            .ok_or_else(|| DomainError::TestCaseNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn into_cases(self) -> Vec<TestCase> {
        self.cases
    }
}
