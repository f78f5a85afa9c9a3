use super::ColumnSchema;
use super::TableSchema;
use crate::LoadError;
use std::io::Read;

/// Decodes a schema file: one header row, then `name,width,datatype`
/// per column. Rows map 1:1 to columns in file order. Only the shape
/// of the file is checked here; see [`TableSchema::validate`].
pub fn parse<R: Read>(body: R) -> Result<TableSchema, LoadError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body)
        .records()
        .map(|record| {
            let record = record?;
            match record.len() {
                3 => Ok(ColumnSchema::new(&record[0], &record[1], &record[2])),
                found => Err(LoadError::Shape {
                    row: record.position().map_or(0, |p| p.line()),
                    found,
                }),
            }
        })
        .collect()
}

impl TryFrom<&[u8]> for TableSchema {
    type Error = LoadError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        parse(bytes)
    }
}
