// recon-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ReconConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["recon.yaml", "recon.yml"];

/// Loads `recon.yaml` from `project_dir` if there is one, then applies the
/// `RECON_*` environment overrides. No file at all means defaults.
#[instrument(skip(project_dir))]
pub fn load_recon_config(project_dir: &Path) -> Result<ReconConfig, InfrastructureError> {
    let mut config = match find_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading recon config");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str::<ReconConfig>(&content)?
        }
        None => ReconConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

// Pattern 'Layering': RECON_TEST_CONFIGS=/tmp/cases recon check
fn apply_env_overrides(config: &mut ReconConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("RECON_ENV_SETTINGS") {
        info!(old = ?config.env_settings, new = ?val, "Overriding env settings path via ENV");
        config.env_settings = val;
    }
    if let Some(val) = lookup("RECON_TEST_CONFIGS") {
        info!(old = ?config.test_configs, new = ?val, "Overriding test configs dir via ENV");
        config.test_configs = val;
    }
    if let Some(val) = lookup("RECON_EXPORT_DIR") {
        info!(old = ?config.export_path, new = ?val, "Overriding export dir via ENV");
        config.export_path = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        let dir = tempdir()?;
        let mut config = ReconConfig::default();
        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.env_settings, "env_settings.json");
        assert_eq!(config.test_configs, "test_configs");
        assert!(find_config(dir.path()).is_none());
        Ok(())
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("recon.yaml"), "test-configs: cases\n")?;

        let path = find_config(dir.path()).unwrap();
        let config: ReconConfig = serde_yaml::from_str(&fs::read_to_string(path)?)?;
        assert_eq!(config.test_configs, "cases");
        assert_eq!(config.export_path, "target/exports");
        Ok(())
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = ReconConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            "RECON_EXPORT_DIR" => Some("/tmp/out".to_string()),
            _ => None,
        });
        assert_eq!(config.export_path, "/tmp/out");
        assert_eq!(config.env_settings, "env_settings.json");
    }

    #[test]
    fn test_blank_path_rejected() {
        let config = ReconConfig {
            test_configs: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
