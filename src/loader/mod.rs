//! Load orchestration.
//!
//! One call to [`Loader::load`] runs the whole pipeline for one file:
//!
//! 1. derive the target table from the file key
//! 2. fetch `<table>.csv` from the schema bucket and parse it
//! 3. probe the warehouse catalog for the table
//! 4. create the table if the probe came back empty
//! 5. COPY the file into the table
//!
//! The first failure ends the load and is returned as-is. Nothing is
//! retried or rolled back; a table created in step 4 stays if step 5
//! fails. The probe and the create are not atomic, so two concurrent
//! loads of a brand-new table can both try to create it; the loser
//! fails with the warehouse's error.
mod deadline;
mod request;

pub use deadline::*;
pub use request::*;

use crate::LoadError;
use crate::Logger;
use crate::schema::TableSchema;
use crate::sql;
use crate::sql::Origin;
use crate::storage::Storage;
use crate::warehouse::Warehouse;
use std::time::Duration;
use std::time::Instant;

pub struct Loader<S, W> {
    storage: S,
    warehouse: W,
    origin: Origin,
    schemas: String,
    timeout: Option<Duration>,
}

impl<S: Storage, W: Warehouse> Loader<S, W> {
    pub fn new(storage: S, warehouse: W, origin: Origin, schemas: impl Into<String>) -> Self {
        Self {
            storage,
            warehouse,
            origin,
            schemas: schemas.into(),
            timeout: None,
        }
    }

    /// Bounds each invocation; every outbound call gets the time left.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
    pub fn warehouse(&self) -> &W {
        &self.warehouse
    }

    /// Loads the data file at `key` into the table its name points to.
    pub async fn load(&self, logger: &Logger, key: &str) -> Result<(), LoadError> {
        let ref deadline = Deadline::after(self.timeout);
        let ref request = LoadRequest::from(key);
        let schema = self.fetch(logger, request, deadline).await?;
        if !self.exists(logger, request, deadline).await? {
            self.create(logger, request, &schema, deadline).await?;
        }
        self.copy(logger, request, &schema, deadline).await
    }

    async fn fetch(
        &self,
        logger: &Logger,
        request: &LoadRequest,
        deadline: &Deadline,
    ) -> Result<TableSchema, LoadError> {
        let ref key = request.schema();
        logger.info(
            "loading data schema",
            &[("schema_bucket", &self.schemas), ("schema_name", &request.table())],
        );
        let body = deadline
            .bound("schema fetch", self.storage.get(&self.schemas, key))
            .await?;
        TableSchema::try_from(&body[..])
    }

    async fn exists(&self, logger: &Logger, request: &LoadRequest, deadline: &Deadline) -> Result<bool, LoadError> {
        let start = Instant::now();
        let (table, target) = (request.table(), request.key());
        logger.info(
            "checking table existence",
            &[("table_name", &table), ("copy_target", &target)],
        );
        match deadline
            .bound("existence check", self.warehouse.exists(table))
            .await
        {
            Ok(exists) => {
                logger.info(
                    "table existence checked",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                        ("exists", &exists),
                    ],
                );
                Ok(exists)
            }
            Err(e) => {
                logger.error(
                    "table existence check failure",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                        ("err", &e),
                    ],
                );
                Err(e)
            }
        }
    }

    async fn create(
        &self,
        logger: &Logger,
        request: &LoadRequest,
        schema: &TableSchema,
        deadline: &Deadline,
    ) -> Result<(), LoadError> {
        let (table, target) = (request.table(), request.key());
        logger.info(
            "table not found creating new one",
            &[("table_name", &table), ("copy_target", &target)],
        );
        let ref ddl = sql::create_table(logger, table, schema)?;
        let start = Instant::now();
        match deadline.bound("create table", self.warehouse.execute(ddl)).await {
            Ok(()) => {
                logger.info(
                    "created table successfully",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                    ],
                );
                Ok(())
            }
            Err(e) => {
                logger.error(
                    "create table failure",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                        ("err", &e),
                    ],
                );
                Err(e)
            }
        }
    }

    async fn copy(
        &self,
        logger: &Logger,
        request: &LoadRequest,
        schema: &TableSchema,
        deadline: &Deadline,
    ) -> Result<(), LoadError> {
        let (table, target) = (request.table(), request.key());
        let ref statement = sql::copy_from(logger, &self.origin, schema, table, target);
        let start = Instant::now();
        logger.info(
            "attempting copy command",
            &[("table_name", &table), ("copy_target", &target)],
        );
        match deadline.bound("copy", self.warehouse.execute(statement)).await {
            Ok(()) => {
                logger.info(
                    "copy command complete",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                    ],
                );
                Ok(())
            }
            Err(e) => {
                logger.error(
                    "copy command failure",
                    &[
                        ("elapsed_time", &elapsed(start)),
                        ("table_name", &table),
                        ("copy_target", &target),
                        ("err", &e),
                    ],
                );
                Err(e)
            }
        }
    }
}

fn elapsed(start: Instant) -> String {
    format!("{:?}", start.elapsed())
}
