use crate::LoadError;

/// One destination column as declared in the schema file.
///
/// Fields are kept exactly as written. `width` stays textual because
/// the COPY statement repeats it verbatim and only TEXT columns ever
/// need it as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    name: String,
    width: String,
    data_type: String,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, width: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: width.into(),
            data_type: data_type.into(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn width(&self) -> &str {
        &self.width
    }
    pub fn data_type(&self) -> &str {
        &self.data_type
    }
    /// Column clause for CREATE TABLE, e.g. `name VARCHAR(10)`.
    pub fn clause(&self) -> Result<String, LoadError> {
        let rendered = match DataType::try_from(self.data_type())? {
            DataType::Text => text_width(self.width()).map(|_| format!("VARCHAR({})", self.width()))?,
            fixed => fixed.to_string(),
        };
        Ok(format!("{} {}", self.name(), rendered))
    }
    /// Fixed-width spec for COPY, e.g. `name:10`.
    pub fn span(&self) -> String {
        format!("{}:{}", self.name(), self.width())
    }
}

/// Warehouse column types the loader knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Text,
    Integer,
    Boolean,
}

impl TryFrom<&str> for DataType {
    type Error = LoadError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "TEXT" => Ok(Self::Text),
            "INTEGER" => Ok(Self::Integer),
            "BOOLEAN" => Ok(Self::Boolean),
            _ => Err(LoadError::UnsupportedType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "TEXT"),
            Self::Integer => write!(f, "INTEGER"),
            Self::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

/// Parses a TEXT width and enforces the VARCHAR ceiling.
fn text_width(width: &str) -> Result<usize, LoadError> {
    let parsed = width.parse::<usize>()?;
    match parsed <= crate::MAX_TEXT_WIDTH {
        true => Ok(parsed),
        false => Err(LoadError::WidthExceeded(width.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renders_varchar() {
        let col = ColumnSchema::new("testCol1", "42", "TEXT");
        assert_eq!(col.clause().unwrap(), "testCol1 VARCHAR(42)");
    }

    #[test]
    fn fixed_types_ignore_width() {
        let col = ColumnSchema::new("flag", "not-a-number", "BOOLEAN");
        assert_eq!(col.clause().unwrap(), "flag BOOLEAN");
        let col = ColumnSchema::new("count", "8", "INTEGER");
        assert_eq!(col.clause().unwrap(), "count INTEGER");
    }

    #[test]
    fn type_names_are_case_sensitive() {
        assert!(matches!(
            DataType::try_from("text"),
            Err(LoadError::UnsupportedType(t)) if t == "text"
        ));
    }

    #[test]
    fn text_width_boundary() {
        assert_eq!(text_width("256").unwrap(), 256);
        assert!(matches!(
            text_width("257"),
            Err(LoadError::WidthExceeded(w)) if w == "257"
        ));
        assert!(matches!(text_width("a"), Err(LoadError::Width(_))));
        assert!(matches!(text_width("-1"), Err(LoadError::Width(_))));
    }

    #[test]
    fn span_keeps_width_text() {
        assert_eq!(ColumnSchema::new("testCol3", "8", "BOOLEAN").span(), "testCol3:8");
    }
}
