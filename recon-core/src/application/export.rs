// recon-core/src/application/export.rs

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::test_case::TestCase;
use crate::error::ReconError;
use crate::ports::connector::SqlDriver;

pub const SOURCE_TABLE: &str = "source.csv";
pub const TARGET_TABLE: &str = "target.csv";

/// Where the two tables of one test case ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTables {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Materializes both origins of `case` under `<export_dir>/<test name>/`.
///
/// Refuses to touch the data of a test case that does not pass its own
/// checks, so a comparison never starts from a half-valid configuration.
#[instrument(skip(case, driver), fields(test = case.name()))]
pub fn export_test_case(
    case: &TestCase,
    export_dir: &Path,
    driver: &dyn SqlDriver,
) -> Result<ExportedTables, ReconError> {
    let errors = case.description_errors(driver)?;
    if !errors.is_empty() {
        return Err(DomainError::InvalidTestCase {
            name: case.name().to_string(),
            errors: errors.join("\n"),
        }
        .into());
    }

    let case_dir = export_dir.join(case.name());
    let tables = ExportedTables {
        source: case_dir.join(SOURCE_TABLE),
        target: case_dir.join(TARGET_TABLE),
    };

    case.source().export_to_table(&tables.source, driver)?;
    case.target().export_to_table(&tables.target, driver)?;

    info!(dir = %case_dir.display(), "Exported source and target");
    Ok(tables)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::environment::{Environment, EnvironmentRegistry};
    use crate::infrastructure::adapters::duckdb::{DuckDbDriver, IN_MEMORY};
    use anyhow::Result;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn registry() -> EnvironmentRegistry {
        [(
            "local".to_string(),
            Environment {
                server: "localhost".into(),
                database: IN_MEMORY.into(),
            },
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_export_flat_and_query() -> Result<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("orders.csv");
        let sql = dir.path().join("orders.sql");
        fs::write(&csv, "order_id,total\n1,9.5\n2,12\n")?;
        fs::write(
            &sql,
            "SELECT * FROM (VALUES (1, 'nine'), (2, 'twelve, net')) AS t(id, total_label) ORDER BY id",
        )?;

        let case = TestCase::new(
            "orders",
            json!({
                "column_mapping": [
                    {"source_name": "order_id", "target_name": "id", "key": true},
                    {"source_name": "total", "target_name": "total_label", "key": false}
                ],
                "source": {"type": "flat_file", "file_path": csv.to_string_lossy()},
                "target": {"type": "sql_query", "environment": "local", "file_path": sql.to_string_lossy()}
            }),
            &registry(),
        )?;

        let out = dir.path().join("exports");
        let tables = export_test_case(&case, &out, &DuckDbDriver::new())?;

        assert_eq!(tables.source, out.join("orders").join(SOURCE_TABLE));
        assert_eq!(fs::read(&tables.source)?, fs::read(&csv)?);
        assert_eq!(
            fs::read_to_string(&tables.target)?,
            "id,total_label\n1,nine\n2,\"twelve, net\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_case_is_not_exported() -> Result<()> {
        let dir = tempdir()?;
        let case = TestCase::new(
            "broken",
            json!({
                "column_mapping": [],
                "source": {"type": "flat_file", "file_path": "does/not/exist.csv"},
                "target": {"type": "flat_file", "file_path": "does/not/exist.csv"}
            }),
            &registry(),
        )?;

        let out = dir.path().join("exports");
        let err = export_test_case(&case, &out, &DuckDbDriver::new()).unwrap_err();
        assert!(matches!(
            err,
            ReconError::Domain(DomainError::InvalidTestCase { .. })
        ));
        assert!(!out.exists());
        Ok(())
    }
}
