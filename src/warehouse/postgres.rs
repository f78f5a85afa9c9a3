use super::Warehouse;
use crate::LoadError;
use crate::Logger;
use crate::sql::EXISTS;
use tokio_postgres::Client;
use tokio_postgres::Config;

/// Redshift speaks the Postgres wire protocol, so the warehouse is a
/// plain `tokio_postgres::Client`.
#[async_trait::async_trait]
impl Warehouse for Client {
    async fn exists(&self, table: &str) -> Result<bool, LoadError> {
        self.query_opt(EXISTS, &[&table])
            .await
            .map(|row| row.is_some())
            .map_err(LoadError::warehouse)
    }
    /// Simple-query protocol, as COPY and DDL take no bind parameters.
    async fn execute(&self, sql: &str) -> Result<(), LoadError> {
        self.batch_execute(sql).await.map_err(LoadError::warehouse)
    }
}

/// Opens a connection and spawns its driver task.
/// Driver failures after connect are logged, not returned.
pub async fn connect(logger: &Logger, config: &Config) -> Result<Client, LoadError> {
    logger.info(
        "connecting to warehouse",
        &[("dbname", &config.get_dbname().unwrap_or_default())],
    );
    let (client, connection) = config
        .connect(tokio_postgres::NoTls)
        .await
        .map_err(LoadError::warehouse)?;
    let logger = logger.clone();
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            logger.error("warehouse connection closed", &[("err", &e)]);
        }
    });
    Ok(client)
}
