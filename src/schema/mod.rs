//! Column schemas as declared in per-table schema files.
mod column;
mod parse;
mod table;

pub use column::*;
pub use parse::*;
pub use table::*;
