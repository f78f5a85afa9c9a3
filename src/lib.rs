//! Schema-driven bulk loader from S3 into Redshift.
//!
//! A data file named `<table>_<anything>` lands in the data bucket. The
//! loader reads `<table>.csv` from the schema bucket, creates the table
//! if the warehouse does not have it yet, and issues a fixed-width
//! `COPY` of the file.
//!
//! ## Modules
//!
//! - [`schema`] — schema file parsing and validation
//! - [`sql`] — `CREATE TABLE` and `COPY` statement builders
//! - [`loader`] — the per-file load pipeline
//! - [`event`] — S3 notification handling
//! - [`storage`], [`warehouse`] — collaborator traits and adapters
//! - [`logging`] — explicit structured logger
pub mod event;
pub mod loader;
pub mod logging;
pub mod schema;
pub mod sql;
pub mod storage;
pub mod warehouse;

#[cfg(feature = "server")]
pub mod config;

#[cfg(test)]
mod mock;

mod error;

pub use error::*;
pub use logging::Logger;

// ============================================================================
// WAREHOUSE LIMITS
// ============================================================================
/// Most columns a Redshift table may have.
pub const MAX_COLUMNS: usize = 1600;
/// Widest VARCHAR the loader will create for a TEXT column.
pub const MAX_TEXT_WIDTH: usize = 256;

// ============================================================================
// NAMING
// ============================================================================
/// Splits the target table name off the front of a data file key.
pub const SEPARATOR: char = '_';
/// Appended to the table name to find its schema file.
pub const SCHEMA_SUFFIX: &str = ".csv";

// ============================================================================
// CONNECTION DEFAULTS
// ============================================================================
/// Redshift's listener port.
pub const DEFAULT_PORT: u16 = 5439;
pub const DEFAULT_USER: &str = "admin";
