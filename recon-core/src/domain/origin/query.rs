// recon-core/src/domain/origin/query.rs

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use super::non_empty;
use crate::domain::environment::{ConnectionDescriptor, EnvironmentRegistry};
use crate::domain::error::DomainError;
use crate::error::ReconError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write_with, is_readable_file};
use crate::ports::connector::{QueryResult, SqlDriver};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySettings {
    #[serde(default)]
    pub environment: Option<String>,

    /// Path of the file holding the SQL text.
    #[serde(default)]
    pub file_path: Option<String>,
}

const NOT_LOADED_REASON: &str = "the query file was not readable when the test case was loaded; \
     reload the test cases to pick it up";

/// The result of one SQL statement run against a named environment.
#[derive(Debug, Clone)]
pub struct QueryOrigin {
    raw: Map<String, Value>,
    environment: Option<String>,
    query_path: Option<PathBuf>,
    // Both resolved once in `new`, and only when the settings allow it.
    descriptor: Option<ConnectionDescriptor>,
    query: Option<String>,
}

impl QueryOrigin {
    /// Resolves the connection descriptor and reads the query text when the
    /// environment is known and the query file is there. Incomplete settings
    /// are kept as-is for [`QueryOrigin::validate`] to report.
    ///
    /// The query text is read here and never again. A query file created
    /// after construction passes [`QueryOrigin::validate`], but fetching
    /// still fails until the test case is rebuilt.
    pub fn new(
        raw: Map<String, Value>,
        settings: QuerySettings,
        environments: &EnvironmentRegistry,
    ) -> Result<Self, ReconError> {
        let environment = non_empty(settings.environment);
        let query_path = non_empty(settings.file_path).map(PathBuf::from);

        let descriptor = environment
            .as_deref()
            .and_then(|name| environments.descriptor(name));

        let query = match (&descriptor, &query_path) {
            (Some(_), Some(path)) if is_readable_file(path) => {
                Some(fs::read_to_string(path).map_err(InfrastructureError::Io)?)
            }
            _ => None,
        };

        Ok(Self {
            raw,
            environment,
            query_path,
            descriptor,
            query,
        })
    }

    pub fn raw_settings(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn query_path(&self) -> Option<&Path> {
        self.query_path.as_deref()
    }

    pub fn descriptor(&self) -> Option<&ConnectionDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Stops at the first problem: each check only makes sense once the
    /// previous one passed. Does not try to connect.
    pub fn validate(&self) -> Vec<String> {
        let Some(environment) = &self.environment else {
            return vec![
                "Source type \"sql_query\" should contain the required attribute \"environment\""
                    .to_string(),
            ];
        };
        if self.descriptor.is_none() {
            return vec![format!(
                "Unable to read settings for environment \"{}\"",
                environment
            )];
        }
        let Some(path) = &self.query_path else {
            return vec![
                "Source type \"sql_query\" should contain the required attribute \"file_path\""
                    .to_string(),
            ];
        };
        if !is_readable_file(path) {
            return vec![format!("Couldn't read the query file \"{}\"", path.display())];
        }
        Vec::new()
    }

    pub fn columns(&self, driver: &dyn SqlDriver) -> Result<Vec<String>, ReconError> {
        // TODO: wrap the statement to fetch zero rows once drivers expose a
        // schema-only execution mode.
        Ok(self.fetch(driver)?.columns)
    }

    #[instrument(skip(self, driver), fields(environment = ?self.environment))]
    pub fn export_to_table(
        &self,
        destination: &Path,
        driver: &dyn SqlDriver,
    ) -> Result<(), ReconError> {
        let result = self.fetch(driver)?;

        atomic_write_with(destination, |file| {
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(&result.columns)?;
            for row in &result.rows {
                writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
            }
            writer.flush()?;
            Ok(())
        })?;

        info!(
            rows = result.rows.len(),
            destination = %destination.display(),
            "Exported query result"
        );
        Ok(())
    }

    /// One connection per call, dropped before returning whatever happened.
    fn fetch(&self, driver: &dyn SqlDriver) -> Result<QueryResult, ReconError> {
        let (descriptor, query) = match (&self.descriptor, &self.query) {
            (Some(descriptor), Some(query)) => (descriptor, query),
            _ => {
                let reason = self
                    .validate()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| NOT_LOADED_REASON.to_string());
                return Err(DomainError::OriginNotReady {
                    origin: "sql_query".into(),
                    reason,
                }
                .into());
            }
        };

        debug!(
            driver = driver.driver_name(),
            server = %descriptor.server,
            database = %descriptor.database,
            "Opening connection"
        );
        let mut connection = driver.connect(descriptor)?;
        let result = connection.query(query)?;
        debug!(
            columns = result.columns.len(),
            rows = result.rows.len(),
            "Query finished"
        );
        Ok(result)
    }
}
