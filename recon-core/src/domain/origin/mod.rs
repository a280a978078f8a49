// recon-core/src/domain/origin/mod.rs

//! Data origins: where one side of a comparison comes from.
//!
//! Every origin answers three questions: is my configuration usable
//! ([`DataOrigin::validate`]), what columns do I produce
//! ([`DataOrigin::columns`]) and can you give me everything as CSV
//! ([`DataOrigin::export_to_table`]). Configuration problems are reported as
//! strings by `validate`; the data operations return errors instead, and are
//! only meant to run once `validate` came back empty.

pub mod flat_file;
pub mod query;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use crate::domain::environment::EnvironmentRegistry;
use crate::domain::error::DomainError;
use crate::error::ReconError;
use crate::ports::connector::SqlDriver;

pub use flat_file::{FlatFileOrigin, FlatFileSettings};
pub use query::{QueryOrigin, QuerySettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    FlatFile,
    Query,
}

impl OriginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginKind::FlatFile => "flat_file",
            OriginKind::Query => "sql_query",
        }
    }

    pub fn parse(declared: &str) -> Option<Self> {
        match declared {
            "flat_file" => Some(OriginKind::FlatFile),
            "sql_query" => Some(OriginKind::Query),
            _ => None,
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An origin block that could not be turned into a real origin: missing,
/// not an object, unknown `type`, or fields of the wrong JSON type.
#[derive(Debug, Clone)]
pub struct MisconfiguredOrigin {
    raw: Map<String, Value>,
    problem: String,
}

impl MisconfiguredOrigin {
    pub fn problem(&self) -> &str {
        &self.problem
    }
}

#[derive(Debug, Clone)]
pub enum DataOrigin {
    FlatFile(FlatFileOrigin),
    Query(QueryOrigin),
    Misconfigured(MisconfiguredOrigin),
}

impl DataOrigin {
    /// Builds an origin from its block of a test description.
    ///
    /// Never fails on bad settings: those end up in [`DataOrigin::validate`].
    /// The only error is the query text read of an otherwise valid query
    /// origin.
    pub fn from_config(
        block: Option<&Value>,
        environments: &EnvironmentRegistry,
    ) -> Result<Self, ReconError> {
        let raw = match block {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Ok(misconfigured(Map::new(), "Settings should be a JSON object")),
            None => return Ok(misconfigured(Map::new(), "Settings are missing")),
        };

        let kind = match raw.get("type") {
            Some(Value::String(declared)) => match OriginKind::parse(declared) {
                Some(kind) => kind,
                None => {
                    let problem = format!(
                        "Unrecognized type \"{}\", expected \"flat_file\" or \"sql_query\"",
                        declared
                    );
                    return Ok(misconfigured(raw, problem));
                }
            },
            Some(other) => {
                let problem = format!("Attribute \"type\" should be a string, got {}", other);
                return Ok(misconfigured(raw, problem));
            }
            None => {
                return Ok(misconfigured(
                    raw,
                    "Settings should contain the required attribute \"type\"",
                ));
            }
        };

        let origin = match kind {
            OriginKind::FlatFile => match typed_settings::<FlatFileSettings>(&raw, kind) {
                Ok(settings) => DataOrigin::FlatFile(FlatFileOrigin::new(raw, settings)),
                Err(problem) => misconfigured(raw, problem),
            },
            OriginKind::Query => match typed_settings::<QuerySettings>(&raw, kind) {
                Ok(settings) => {
                    DataOrigin::Query(QueryOrigin::new(raw, settings, environments)?)
                }
                Err(problem) => misconfigured(raw, problem),
            },
        };

        Ok(origin)
    }

    pub fn kind(&self) -> Option<OriginKind> {
        match self {
            DataOrigin::FlatFile(_) => Some(OriginKind::FlatFile),
            DataOrigin::Query(_) => Some(OriginKind::Query),
            DataOrigin::Misconfigured(_) => None,
        }
    }

    /// The origin block exactly as it was parsed.
    pub fn raw_settings(&self) -> &Map<String, Value> {
        match self {
            DataOrigin::FlatFile(origin) => origin.raw_settings(),
            DataOrigin::Query(origin) => origin.raw_settings(),
            DataOrigin::Misconfigured(origin) => &origin.raw,
        }
    }

    /// Human-readable problems with this origin's settings. Empty means the
    /// data operations are safe to call.
    pub fn validate(&self) -> Vec<String> {
        match self {
            DataOrigin::FlatFile(origin) => origin.validate(),
            DataOrigin::Query(origin) => origin.validate(),
            DataOrigin::Misconfigured(origin) => vec![origin.problem.clone()],
        }
    }

    /// Column names in the order the data provides them.
    pub fn columns(&self, driver: &dyn SqlDriver) -> Result<Vec<String>, ReconError> {
        match self {
            DataOrigin::FlatFile(origin) => origin.columns(),
            DataOrigin::Query(origin) => origin.columns(driver),
            DataOrigin::Misconfigured(origin) => Err(origin.not_ready()),
        }
    }

    /// Writes the full data set as CSV to `destination`. The destination only
    /// appears once the export completed.
    pub fn export_to_table(
        &self,
        destination: &Path,
        driver: &dyn SqlDriver,
    ) -> Result<(), ReconError> {
        match self {
            DataOrigin::FlatFile(origin) => origin.export_to_table(destination),
            DataOrigin::Query(origin) => origin.export_to_table(destination, driver),
            DataOrigin::Misconfigured(origin) => Err(origin.not_ready()),
        }
    }
}

impl MisconfiguredOrigin {
    fn not_ready(&self) -> ReconError {
        DomainError::OriginNotReady {
            origin: "unknown".into(),
            reason: self.problem.clone(),
        }
        .into()
    }
}

fn misconfigured(raw: Map<String, Value>, problem: impl Into<String>) -> DataOrigin {
    DataOrigin::Misconfigured(MisconfiguredOrigin {
        raw,
        problem: problem.into(),
    })
}

fn typed_settings<T: DeserializeOwned>(
    raw: &Map<String, Value>,
    kind: OriginKind,
) -> Result<T, String> {
    serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|e| format!("Settings for type \"{}\" are malformed: {}", kind, e))
}

/// Treats `""` like an absent attribute.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
