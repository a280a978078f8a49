// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a run finds its inputs and puts its outputs. Read from `recon.yaml`
/// when present; every field has a default.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct ReconConfig {
    /// JSON file mapping environment names to server/database.
    #[serde(rename = "env-settings", default = "default_env_settings")]
    #[validate(length(min = 1, message = "env-settings cannot be empty"))]
    pub env_settings: String,

    /// Directory holding one `<test name>.json` per test case.
    #[serde(rename = "test-configs", default = "default_test_configs")]
    #[validate(length(min = 1, message = "test-configs cannot be empty"))]
    pub test_configs: String,

    #[serde(rename = "export-path", default = "default_export_path")]
    #[validate(length(min = 1, message = "export-path cannot be empty"))]
    pub export_path: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            env_settings: default_env_settings(),
            test_configs: default_test_configs(),
            export_path: default_export_path(),
        }
    }
}

fn default_env_settings() -> String {
    "env_settings.json".to_string()
}
fn default_test_configs() -> String {
    "test_configs".to_string()
}
fn default_export_path() -> String {
    "target/exports".to_string()
}
