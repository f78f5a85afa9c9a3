//! Warehouse access.
#[cfg(feature = "server")]
mod postgres;

#[cfg(feature = "server")]
pub use postgres::*;

use crate::LoadError;
use std::sync::Arc;

/// The two warehouse capabilities a load needs.
/// All SQL text is produced by [`crate::sql`]; implementors only run it.
#[async_trait::async_trait]
pub trait Warehouse: Send + Sync {
    /// Whether the catalog lists a table with exactly this name.
    async fn exists(&self, table: &str) -> Result<bool, LoadError>;
    /// Runs one statement to completion.
    async fn execute(&self, sql: &str) -> Result<(), LoadError>;
}

#[async_trait::async_trait]
impl<T: Warehouse + ?Sized> Warehouse for Arc<T> {
    async fn exists(&self, table: &str) -> Result<bool, LoadError> {
        self.as_ref().exists(table).await
    }
    async fn execute(&self, sql: &str) -> Result<(), LoadError> {
        self.as_ref().execute(sql).await
    }
}
