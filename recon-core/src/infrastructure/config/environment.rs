// recon-core/src/infrastructure/config/environment.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::environment::{Environment, EnvironmentRegistry};
use crate::infrastructure::error::InfrastructureError;

/// Reads the environment settings store: a JSON object of
/// `name -> {"server": ..., "database": ...}`.
///
/// A missing file is fatal: no query origin can be resolved without it.
#[instrument]
pub fn load_environments(path: &Path) -> Result<EnvironmentRegistry, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(format!(
            "Could not initialize environments, failed to read the file {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let environments: BTreeMap<String, Environment> =
        serde_json::from_str(&content).map_err(|source| InfrastructureError::Json {
            path: path.display().to_string(),
            source,
        })?;

    for (name, settings) in &environments {
        settings.validate().map_err(|e| {
            InfrastructureError::ConfigError(format!("Environment '{}': {}", name, e))
        })?;
    }

    info!(count = environments.len(), "Environments loaded");
    Ok(EnvironmentRegistry::new(environments))
}
