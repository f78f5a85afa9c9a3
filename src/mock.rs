//! In-memory stand-ins for object storage and the warehouse.
use crate::LoadError;
use crate::storage::Storage;
use crate::warehouse::Warehouse;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockStorage {
    objects: HashMap<(String, String), Bytes>,
    reads: Mutex<Vec<(String, String)>>,
    fail: Option<String>,
    stall: Option<Duration>,
}

impl MockStorage {
    pub fn put(mut self, bucket: &str, key: &str, body: &str) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), Bytes::from(body.to_string()));
        self
    }
    pub fn failing(mut self, msg: &str) -> Self {
        self.fail = Some(msg.to_string());
        self
    }
    pub fn stalling(mut self, stall: Duration) -> Self {
        self.stall = Some(stall);
        self
    }
    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.lock().expect("reads lock").clone()
    }
}

#[async_trait::async_trait]
impl Storage for MockStorage {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, LoadError> {
        self.reads
            .lock()
            .expect("reads lock")
            .push((bucket.to_string(), key.to_string()));
        if let Some(stall) = self.stall {
            tokio::time::sleep(stall).await;
        }
        if let Some(ref msg) = self.fail {
            return Err(LoadError::storage(msg.clone()));
        }
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::storage(format!("NoSuchKey: {}/{}", bucket, key)))
    }
}

/// One warehouse interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Execute(String),
}

#[derive(Default)]
pub struct MockWarehouse {
    present: bool,
    calls: Mutex<Vec<Call>>,
    fail_exists: Option<String>,
    /// Fails any statement starting with the given prefix.
    fail_execute: Option<(String, String)>,
    stall: Option<Duration>,
    stall_exists: Option<Duration>,
}

impl MockWarehouse {
    pub fn present(mut self) -> Self {
        self.present = true;
        self
    }
    pub fn failing_exists(mut self, msg: &str) -> Self {
        self.fail_exists = Some(msg.to_string());
        self
    }
    pub fn failing_execute(mut self, prefix: &str, msg: &str) -> Self {
        self.fail_execute = Some((prefix.to_string(), msg.to_string()));
        self
    }
    pub fn stalling(mut self, stall: Duration) -> Self {
        self.stall = Some(stall);
        self
    }
    pub fn stalling_exists(mut self, stall: Duration) -> Self {
        self.stall_exists = Some(stall);
        self
    }
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Execute(sql) => Some(sql),
                Call::Exists(_) => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Warehouse for MockWarehouse {
    async fn exists(&self, table: &str) -> Result<bool, LoadError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call::Exists(table.to_string()));
        if let Some(stall) = self.stall_exists {
            tokio::time::sleep(stall).await;
        }
        match self.fail_exists {
            Some(ref msg) => Err(LoadError::warehouse(msg.clone())),
            None => Ok(self.present),
        }
    }
    async fn execute(&self, sql: &str) -> Result<(), LoadError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call::Execute(sql.to_string()));
        if let Some(stall) = self.stall {
            tokio::time::sleep(stall).await;
        }
        match self.fail_execute {
            Some((ref prefix, ref msg)) if sql.starts_with(prefix.as_str()) => {
                Err(LoadError::warehouse(msg.clone()))
            }
            _ => Ok(()),
        }
    }
}
