// recon-core/src/domain/mod.rs

pub mod environment;
pub mod error;
pub mod mapping;
pub mod origin;
pub mod project;
pub mod test_case;

// Re-exports so callers can `use recon_core::domain::TestCase`
pub use environment::{ConnectionDescriptor, Environment, EnvironmentRegistry};
pub use error::DomainError;
pub use mapping::{ColumnMappingEntry, MappingReport, validate_column_mapping};
pub use origin::{DataOrigin, OriginKind};
pub use test_case::TestCase;
