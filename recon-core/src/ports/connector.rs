// recon-core/src/ports/connector.rs

// What a query origin needs from a database: open a connection, run one
// statement, get the columns and the rows back. How the bytes travel is the
// adapter's business (see infrastructure/adapters).

use crate::domain::environment::ConnectionDescriptor;
use crate::error::ReconError;

/// Result set of a single statement, cells already rendered as text.
/// `None` is SQL NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub trait SqlDriver: Send + Sync {
    /// Opens a fresh connection. The connection is released when the returned
    /// box is dropped, on success and failure paths alike.
    fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn SqlConnection>, ReconError>;

    fn driver_name(&self) -> &str;
}

pub trait SqlConnection {
    fn query(&mut self, sql: &str) -> Result<QueryResult, ReconError>;
}
