// recon-core/src/domain/environment.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Connection policy shared by every query origin. Not configurable per test.
pub const ODBC_DRIVER: &str = "{ODBC Driver 17 for SQL Server}";
pub const AUTHENTICATION_MODE: &str = "ActiveDirectoryInteractive";
pub const ENCRYPT_TRANSPORT: bool = true;

/// One named entry of the environment settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Environment {
    #[validate(length(min = 1, message = "server cannot be empty"))]
    pub server: String,

    #[validate(length(min = 1, message = "database cannot be empty"))]
    pub database: String,
}

/// Everything a driver needs to open a connection for a query origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub environment: String,
    pub server: String,
    pub database: String,
    pub driver: &'static str,
    pub authentication: &'static str,
    pub encrypt: bool,
}

impl ConnectionDescriptor {
    pub fn new(environment: &str, settings: &Environment) -> Self {
        Self {
            environment: environment.to_string(),
            server: settings.server.clone(),
            database: settings.database.clone(),
            driver: ODBC_DRIVER,
            authentication: AUTHENTICATION_MODE,
            encrypt: ENCRYPT_TRANSPORT,
        }
    }

    /// `KEY=value;...` form understood by ODBC drivers.
    pub fn connection_string(&self) -> String {
        let encrypt = if self.encrypt { "yes" } else { "no" };
        [
            ("DRIVER", self.driver),
            ("SERVER", self.server.as_str()),
            ("DATABASE", self.database.as_str()),
            ("Authentication", self.authentication),
            ("Encrypt", encrypt),
        ]
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(";")
    }
}

/// Environment name -> connection parameters. Built once per run and only
/// ever read afterwards, so it can be shared freely between test cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRegistry {
    environments: BTreeMap<String, Environment>,
}

impl EnvironmentRegistry {
    pub fn new(environments: BTreeMap<String, Environment>) -> Self {
        Self { environments }
    }

    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.environments.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    pub fn descriptor(&self, name: &str) -> Option<ConnectionDescriptor> {
        self.get(name)
            .map(|settings| ConnectionDescriptor::new(name, settings))
    }
}

impl FromIterator<(String, Environment)> for EnvironmentRegistry {
    fn from_iter<I: IntoIterator<Item = (String, Environment)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
