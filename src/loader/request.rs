use crate::SCHEMA_SUFFIX;
use crate::SEPARATOR;

/// One file to load, as named by the triggering event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    table: String,
    key: String,
}

impl LoadRequest {
    /// Target table: everything before the first separator.
    pub fn table(&self) -> &str {
        &self.table
    }
    /// Full object key of the data file.
    pub fn key(&self) -> &str {
        &self.key
    }
    /// Object key of the table's schema file.
    pub fn schema(&self) -> String {
        format!("{}{}", self.table, SCHEMA_SUFFIX)
    }
}

impl From<&str> for LoadRequest {
    fn from(key: &str) -> Self {
        Self {
            table: key.split(SEPARATOR).next().unwrap_or_default().to_string(),
            key: key.to_string(),
        }
    }
}
