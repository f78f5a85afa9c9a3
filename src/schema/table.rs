use super::ColumnSchema;
use crate::LoadError;
use crate::MAX_COLUMNS;
use std::collections::HashSet;

/// Ordered column list for one destination table.
///
/// Order is significant: it fixes both the column order of the created
/// table and the field positions of the fixed-width COPY.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema(Vec<ColumnSchema>);

impl TableSchema {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.0.iter()
    }
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.0
    }

    /// Checks count, uniqueness, type support and TEXT widths.
    /// The first violation found, in column order, is returned.
    pub fn validate(&self) -> Result<(), LoadError> {
        self.clauses().map(|_| ())
    }

    /// Validated column clauses in schema order.
    pub(crate) fn clauses(&self) -> Result<Vec<String>, LoadError> {
        if self.is_empty() || self.len() > MAX_COLUMNS {
            return Err(LoadError::InvalidSchema(self.len()));
        }
        let mut seen = HashSet::with_capacity(self.len());
        self.iter()
            .map(|col| match seen.insert(col.name()) {
                true => col.clause(),
                false => Err(LoadError::DuplicateColumn(col.name().to_string())),
            })
            .collect()
    }
}

impl From<Vec<ColumnSchema>> for TableSchema {
    fn from(columns: Vec<ColumnSchema>) -> Self {
        Self(columns)
    }
}

impl FromIterator<ColumnSchema> for TableSchema {
    fn from_iter<I: IntoIterator<Item = ColumnSchema>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TableSchema {
    type Item = &'a ColumnSchema;
    type IntoIter = std::slice::Iter<'a, ColumnSchema>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
