// recon-core/src/domain/test_case.rs

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::environment::EnvironmentRegistry;
use crate::domain::mapping::{ColumnMappingEntry, validate_column_mapping};
use crate::domain::origin::DataOrigin;
use crate::error::ReconError;
use crate::ports::connector::SqlDriver;

pub const NOT_AN_OBJECT_ERROR: &str = "Test description should be a JSON object";

/// One named comparison: a source, a target, and how their columns line up.
#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    description: Map<String, Value>,
    /// False when the top level of the description was not a JSON object.
    is_object: bool,
    source: DataOrigin,
    target: DataOrigin,
}

impl TestCase {
    /// Builds both origins from the `source` and `target` blocks. Structural
    /// problems are kept for [`TestCase::description_errors`]; the only error
    /// here comes from reading the query text of a valid query origin.
    pub fn new(
        name: impl Into<String>,
        description: Value,
        environments: &EnvironmentRegistry,
    ) -> Result<Self, ReconError> {
        let (description, is_object) = match description {
            Value::Object(map) => (map, true),
            _ => (Map::new(), false),
        };
        let source = DataOrigin::from_config(description.get("source"), environments)?;
        let target = DataOrigin::from_config(description.get("target"), environments)?;

        Ok(Self {
            name: name.into(),
            description,
            is_object,
            source,
            target,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &DataOrigin {
        &self.source
    }

    pub fn target(&self) -> &DataOrigin {
        &self.target
    }

    /// Parsed mapping entries, `None` when `column_mapping` is absent or not a list.
    pub fn column_mapping(&self) -> Option<Vec<ColumnMappingEntry>> {
        self.description
            .get("column_mapping")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ColumnMappingEntry::from_value).collect())
    }

    /// Every configuration problem of this test case, empty when it is ready
    /// for comparison.
    ///
    /// A description that is not a JSON object yields that single error.
    /// Otherwise origins are checked first. The mapping is only checked, and the
    /// origins' schemas only read, when both origins are valid. Reading a
    /// schema can still fail (connection, I/O): that is returned as `Err`.
    #[instrument(skip(self, driver), fields(test = %self.name))]
    pub fn description_errors(&self, driver: &dyn SqlDriver) -> Result<Vec<String>, ReconError> {
        if !self.is_object {
            return Ok(vec![NOT_AN_OBJECT_ERROR.to_string()]);
        }

        let mut errors = Vec::new();

        let source_errors = self.source.validate();
        if !source_errors.is_empty() {
            errors.push(format!(
                "Incorrect settings for source: {}",
                source_errors.join("\n")
            ));
        }

        let target_errors = self.target.validate();
        if !target_errors.is_empty() {
            errors.push(format!(
                "Incorrect settings for target: {}",
                target_errors.join("\n")
            ));
        }

        if !errors.is_empty() {
            debug!(count = errors.len(), "Origins invalid, mapping not checked");
            return Ok(errors);
        }

        let Some(raw_mapping) = self.description.get("column_mapping") else {
            errors.push(
                "Test description should contain the required attribute \"column_mapping\""
                    .to_string(),
            );
            return Ok(errors);
        };
        let Some(items) = raw_mapping.as_array() else {
            errors.push("Column_mapping should be set as an array of columns".to_string());
            return Ok(errors);
        };

        let entries: Vec<ColumnMappingEntry> =
            items.iter().map(ColumnMappingEntry::from_value).collect();
        let source_columns = self.source.columns(driver)?;
        let target_columns = self.target.columns(driver)?;

        let report = validate_column_mapping(&entries, &source_columns, &target_columns);
        errors.extend(report.into_errors());

        Ok(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::environment::{ConnectionDescriptor, Environment};
    use crate::domain::mapping::MISSING_ATTRIBUTES_ERROR;
    use crate::ports::connector::{QueryResult, SqlConnection};
    use anyhow::Result;
    use serde_json::json;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::{TempDir, tempdir};

    // --- MOCK DRIVER ---
    #[derive(Default, Clone)]
    struct MockDriver {
        connects: Arc<Mutex<Vec<String>>>,
        columns: Vec<String>,
    }

    struct MockConnection {
        columns: Vec<String>,
    }

    impl SqlConnection for MockConnection {
        fn query(&mut self, _sql: &str) -> Result<QueryResult, ReconError> {
            Ok(QueryResult {
                columns: self.columns.clone(),
                rows: vec![],
            })
        }
    }

    impl SqlDriver for MockDriver {
        fn connect(
            &self,
            descriptor: &ConnectionDescriptor,
        ) -> Result<Box<dyn SqlConnection>, ReconError> {
            self.connects
                .lock()
                .unwrap()
                .push(descriptor.environment.clone());
            Ok(Box::new(MockConnection {
                columns: self.columns.clone(),
            }))
        }
        fn driver_name(&self) -> &str {
            "mock"
        }
    }

    fn registry() -> EnvironmentRegistry {
        [(
            "dev".to_string(),
            Environment {
                server: "sql-dev".into(),
                database: "dwh".into(),
            },
        )]
        .into_iter()
        .collect()
    }

    fn csv_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    fn flat(path: &str) -> Value {
        json!({"type": "flat_file", "file_path": path})
    }

    #[test]
    fn test_valid_flat_to_flat() -> Result<()> {
        let dir = tempdir()?;
        let source = csv_file(&dir, "s.csv", "a,b\n1,2\n");
        let target = csv_file(&dir, "t.csv", "x,y\n1,2\n");
        let case = TestCase::new(
            "sales",
            json!({
                "column_mapping": [
                    {"source_name": "a", "target_name": "x", "key": true},
                    {"source_name": "b", "target_name": "y", "key": false}
                ],
                "source": flat(&source),
                "target": flat(&target)
            }),
            &registry(),
        )?;

        assert_eq!(case.name(), "sales");
        assert!(case.description_errors(&MockDriver::default())?.is_empty());
        assert_eq!(case.column_mapping().map(|m| m.len()), Some(2));
        Ok(())
    }

    #[test]
    fn test_non_object_description_is_reported_as_such() -> Result<()> {
        for description in [json!([]), json!("sales"), json!(null)] {
            let case = TestCase::new("t", description, &registry())?;
            assert_eq!(
                case.description_errors(&MockDriver::default())?,
                vec![NOT_AN_OBJECT_ERROR.to_string()]
            );
            assert!(case.column_mapping().is_none());
        }
        Ok(())
    }

    #[test]
    fn test_unknown_source_column_reported_once() -> Result<()> {
        let dir = tempdir()?;
        let source = csv_file(&dir, "s.csv", "a,b\n");
        let target = csv_file(&dir, "t.csv", "x,y\n");
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": [
                    {"source_name": "a", "target_name": "x", "key": true},
                    {"source_name": "c", "target_name": "y", "key": true}
                ],
                "source": flat(&source),
                "target": flat(&target)
            }),
            &registry(),
        )?;

        assert_eq!(
            case.description_errors(&MockDriver::default())?,
            vec!["Column mapping errors: \"c\" doesn't exist in the source".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_missing_target_name_gives_generic_error_only() -> Result<()> {
        let dir = tempdir()?;
        let source = csv_file(&dir, "s.csv", "a\n");
        let target = csv_file(&dir, "t.csv", "x\n");
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": [{"source_name": "a", "key": true}],
                "source": flat(&source),
                "target": flat(&target)
            }),
            &registry(),
        )?;

        assert_eq!(
            case.description_errors(&MockDriver::default())?,
            vec![MISSING_ATTRIBUTES_ERROR.to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_invalid_source_short_circuits_mapping_checks() -> Result<()> {
        let dir = tempdir()?;
        let target = csv_file(&dir, "t.csv", "x\n");
        let missing = dir.path().join("missing.csv");
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": "not a list",
                "source": flat(&missing.to_string_lossy()),
                "target": flat(&target)
            }),
            &registry(),
        )?;

        let errors = case.description_errors(&MockDriver::default())?;
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Incorrect settings for source: "));
        assert!(errors[0].contains("missing.csv"));
        Ok(())
    }

    #[test]
    fn test_unknown_environment_never_queries() -> Result<()> {
        let dir = tempdir()?;
        let sql = csv_file(&dir, "q.sql", "SELECT 1");
        let target = csv_file(&dir, "t.csv", "x\n");
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": [],
                "source": {"type": "sql_query", "environment": "prod", "file_path": sql},
                "target": flat(&target)
            }),
            &registry(),
        )?;

        let driver = MockDriver::default();
        let errors = case.description_errors(&driver)?;
        assert_eq!(
            errors,
            vec!["Incorrect settings for source: Unable to read settings for environment \"prod\"".to_string()]
        );
        assert!(driver.connects.lock().unwrap().is_empty());
        Ok(())
    }

    #[test]
    fn test_both_origins_reported() -> Result<()> {
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": [],
                "source": {"type": "flat_file"},
                "target": {"type": "mainframe"}
            }),
            &registry(),
        )?;

        let errors = case.description_errors(&MockDriver::default())?;
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Incorrect settings for source: "));
        assert!(errors[1].starts_with("Incorrect settings for target: "));
        assert!(errors[1].contains("mainframe"));
        Ok(())
    }

    #[test]
    fn test_column_mapping_presence_and_shape() -> Result<()> {
        let dir = tempdir()?;
        let source = csv_file(&dir, "s.csv", "a\n");
        let target = csv_file(&dir, "t.csv", "x\n");

        let absent = TestCase::new(
            "t",
            json!({"source": flat(&source), "target": flat(&target)}),
            &registry(),
        )?;
        assert_eq!(
            absent.description_errors(&MockDriver::default())?,
            vec!["Test description should contain the required attribute \"column_mapping\"".to_string()]
        );

        let not_a_list = TestCase::new(
            "t",
            json!({"column_mapping": {"a": "x"}, "source": flat(&source), "target": flat(&target)}),
            &registry(),
        )?;
        assert_eq!(
            not_a_list.description_errors(&MockDriver::default())?,
            vec!["Column_mapping should be set as an array of columns".to_string()]
        );
        assert!(not_a_list.column_mapping().is_none());
        Ok(())
    }

    #[test]
    fn test_query_columns_read_once_per_origin() -> Result<()> {
        let dir = tempdir()?;
        let sql = csv_file(&dir, "q.sql", "SELECT id FROM t");
        let target = csv_file(&dir, "t.csv", "id\n");
        let case = TestCase::new(
            "t",
            json!({
                "column_mapping": [
                    {"source_name": "id", "target_name": "id", "key": true},
                    {"source_name": "ghost", "target_name": "id", "key": false}
                ],
                "source": {"type": "sql_query", "environment": "dev", "file_path": sql},
                "target": flat(&target)
            }),
            &registry(),
        )?;
        let driver = MockDriver {
            columns: vec!["id".into()],
            ..Default::default()
        };

        let errors = case.description_errors(&driver)?;
        assert_eq!(
            errors,
            vec!["Column mapping errors: \"ghost\" doesn't exist in the source".to_string()]
        );
        assert_eq!(*driver.connects.lock().unwrap(), vec!["dev".to_string()]);
        Ok(())
    }
}
