use crate::LoadError;
use crate::Logger;
use crate::schema::TableSchema;

/// Renders `CREATE TABLE <table>( <col> <type>, ...);` after validating
/// the schema. TEXT columns become the narrowest VARCHAR that fits the
/// declared width.
///
/// Identifiers are emitted verbatim, without quoting.
pub fn create_table(logger: &Logger, table: &str, schema: &TableSchema) -> Result<String, LoadError> {
    let sql = format!(
        "CREATE TABLE {}({});",
        table,
        schema
            .clauses()?
            .iter()
            .map(|clause| format!(" {}", clause))
            .collect::<Vec<String>>()
            .join(",")
    );
    logger.debug("built create table query", &[("generated_query", &sql)]);
    Ok(sql)
}
