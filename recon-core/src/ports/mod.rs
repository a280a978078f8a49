// recon-core/src/ports/mod.rs

pub mod connector;

pub use connector::{QueryResult, SqlConnection, SqlDriver};
