// recon-core/src/domain/origin/flat_file.rs

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::non_empty;
use crate::domain::error::DomainError;
use crate::error::ReconError;
use crate::infrastructure::fs::{atomic_copy, is_readable_file};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatFileSettings {
    #[serde(default)]
    pub file_path: Option<String>,
}

/// A CSV file on disk. Exporting it is a plain byte copy.
#[derive(Debug, Clone)]
pub struct FlatFileOrigin {
    raw: Map<String, Value>,
    file_path: Option<PathBuf>,
}

impl FlatFileOrigin {
    pub fn new(raw: Map<String, Value>, settings: FlatFileSettings) -> Self {
        Self {
            raw,
            file_path: non_empty(settings.file_path).map(PathBuf::from),
        }
    }

    pub fn raw_settings(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn validate(&self) -> Vec<String> {
        match &self.file_path {
            None => vec![
                "Source type \"flat_file\" should contain the required attribute \"file_path\""
                    .to_string(),
            ],
            Some(path) if !is_readable_file(path) => {
                vec![format!("Couldn't read the source file \"{}\"", path.display())]
            }
            Some(_) => Vec::new(),
        }
    }

    #[instrument(skip(self), fields(path = ?self.file_path))]
    pub fn columns(&self) -> Result<Vec<String>, ReconError> {
        let path = self.ready_path()?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        debug!(count = columns.len(), "Read flat file header");
        Ok(columns)
    }

    #[instrument(skip(self), fields(path = ?self.file_path))]
    pub fn export_to_table(&self, destination: &Path) -> Result<(), ReconError> {
        let path = self.ready_path()?;
        atomic_copy(path, destination)?;
        debug!(destination = %destination.display(), "Copied flat file");
        Ok(())
    }

    fn ready_path(&self) -> Result<&Path, ReconError> {
        let path = self.file_path.as_deref().ok_or_else(|| DomainError::OriginNotReady {
            origin: "flat_file".into(),
            reason: "no file_path configured".into(),
        })?;
        Ok(path)
    }
}
