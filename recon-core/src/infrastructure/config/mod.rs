// recon-core/src/infrastructure/config/mod.rs

pub mod environment;
pub mod project;
pub mod test_cases;

pub use crate::domain::project::ReconConfig;
pub use environment::load_environments;
pub use project::load_recon_config;
pub use test_cases::TestCaseRegistry;
