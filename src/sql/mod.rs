//! The two statement shapes the loader issues.
//!
//! - [`create_table`] — validated `CREATE TABLE` for a new target table
//! - [`copy_from`] — fixed-width `COPY` of one S3 object
//! - [`EXISTS`] — catalog probe for a table name
mod copy;
mod create;

pub use copy::*;
pub use create::*;

#[rustfmt::skip]
pub const CATALOG: &str = "INFORMATION_SCHEMA.TABLES";
/// Yields one row iff a table named `$1` exists.
#[rustfmt::skip]
pub const EXISTS:  &str = const_format::concatcp!(
    "SELECT TRUE ",
    "WHERE EXISTS(SELECT * FROM ", CATALOG, " WHERE TABLE_NAME = $1);"
);
