// recon/src/commands/mod.rs

pub mod check;
pub mod export;
pub mod list;

use std::path::Path;
use tracing::debug;

use recon_core::domain::EnvironmentRegistry;
use recon_core::infrastructure::config::{
    ReconConfig, TestCaseRegistry, load_environments, load_recon_config,
};

use crate::cli::Locations;

/// Everything a command needs: resolved config, environments, test cases.
pub struct Workspace {
    pub config: ReconConfig,
    pub environments: EnvironmentRegistry,
    pub test_cases: TestCaseRegistry,
}

/// recon.yaml -> ENV -> CLI flags, then the two loads that abort the run on failure.
pub fn load_workspace(locations: &Locations) -> miette::Result<Workspace> {
    let mut config = load_recon_config(Path::new("."))?;
    if let Some(settings) = &locations.settings {
        config.env_settings = settings.to_string_lossy().to_string();
    }
    if let Some(dir) = &locations.test_configs {
        config.test_configs = dir.to_string_lossy().to_string();
    }

    debug!(?config, "Resolved configuration");

    let environments = load_environments(Path::new(&config.env_settings))?;
    let test_cases =
        TestCaseRegistry::discover_and_load(Path::new(&config.test_configs), &environments)?;

    Ok(Workspace {
        config,
        environments,
        test_cases,
    })
}
