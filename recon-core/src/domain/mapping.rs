// recon-core/src/domain/mapping.rs

use serde_json::Value;
use std::collections::HashSet;

pub const MISSING_ATTRIBUTES_ERROR: &str =
    "Each column in the mapping should have required attributes: \"source_name\", \"target_name\", \"key\"";

/// One declared source column <-> target column pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMappingEntry {
    pub source_name: Option<String>,
    pub target_name: Option<String>,
    /// Raw value of `key`; only its presence is required here.
    pub key: Option<Value>,
}

impl ColumnMappingEntry {
    /// Lenient read of one mapping item. Non-string names are compared by
    /// their JSON text; anything that is not an object has no attributes.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let name = |field: &str| {
            object.get(field).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        };
        Self {
            source_name: name("source_name"),
            target_name: name("target_name"),
            key: object.get("key").cloned(),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self.key, Some(Value::Bool(true)))
    }

    pub fn is_complete(&self) -> bool {
        self.source_name.is_some() && self.target_name.is_some() && self.key.is_some()
    }
}

/// Outcome of checking a mapping against the two live schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub missing_required_attributes: bool,
    pub unknown_columns: Vec<String>,
}

impl MappingReport {
    pub fn is_empty(&self) -> bool {
        !self.missing_required_attributes && self.unknown_columns.is_empty()
    }

    /// Top-level messages: at most one for missing attributes, then every
    /// unknown column under a single heading.
    pub fn into_errors(self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.missing_required_attributes {
            errors.push(MISSING_ATTRIBUTES_ERROR.to_string());
        }
        if !self.unknown_columns.is_empty() {
            errors.push(format!(
                "Column mapping errors: {}",
                self.unknown_columns.join("\n")
            ));
        }
        errors
    }
}

pub fn validate_column_mapping(
    entries: &[ColumnMappingEntry],
    source_columns: &[String],
    target_columns: &[String],
) -> MappingReport {
    let source: HashSet<&str> = source_columns.iter().map(String::as_str).collect();
    let target: HashSet<&str> = target_columns.iter().map(String::as_str).collect();

    let mut report = MappingReport::default();
    for entry in entries {
        match &entry.source_name {
            Some(name) if !source.contains(name.as_str()) => report
                .unknown_columns
                .push(format!("\"{}\" doesn't exist in the source", name)),
            Some(_) => {}
            None => report.missing_required_attributes = true,
        }
        match &entry.target_name {
            Some(name) if !target.contains(name.as_str()) => report
                .unknown_columns
                .push(format!("\"{}\" doesn't exist in the target", name)),
            Some(_) => {}
            None => report.missing_required_attributes = true,
        }
        if entry.key.is_none() {
            report.missing_required_attributes = true;
        }
    }
    report
}
