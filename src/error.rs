/// Boxed collaborator failure, surfaced verbatim.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can abort a load.
///
/// Schema problems are reported with the offending value so the message
/// alone is enough to fix the schema file. Collaborator failures
/// (object storage, warehouse) pass through with their original message.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The schema body is not well-formed CSV.
    #[error(transparent)]
    Format(#[from] csv::Error),
    /// A schema row does not carry exactly name, width and type.
    #[error("schema row {row} has {found} fields, expected 3")]
    Shape { row: u64, found: usize },
    /// Column count outside `1..=MAX_COLUMNS`.
    #[error("invalid number of columns defined in schema: {0}")]
    InvalidSchema(usize),
    #[error("duplicate column name passed in schema: {0}")]
    DuplicateColumn(String),
    #[error("unknown data type passed {0}")]
    UnsupportedType(String),
    /// TEXT column wider than `MAX_TEXT_WIDTH`.
    #[error("passed column width {0} is larger then TEXT field allows")]
    WidthExceeded(String),
    /// TEXT column width is not a decimal integer.
    #[error(transparent)]
    Width(#[from] std::num::ParseIntError),
    #[error(transparent)]
    Storage(Cause),
    #[error(transparent)]
    Warehouse(Cause),
    /// The invocation ran past its deadline while waiting on a collaborator.
    #[error("deadline exceeded during {0}")]
    Deadline(&'static str),
}

impl LoadError {
    pub fn storage(e: impl Into<Cause>) -> Self {
        Self::Storage(e.into())
    }
    pub fn warehouse(e: impl Into<Cause>) -> Self {
        Self::Warehouse(e.into())
    }
}
