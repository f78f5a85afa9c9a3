//! Object storage reads.
#[cfg(feature = "server")]
mod buckets;

#[cfg(feature = "server")]
pub use buckets::*;

use crate::LoadError;
use bytes::Bytes;
use std::sync::Arc;

/// Read side of object storage, addressed by bucket and key.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Whole object body. Missing objects and denied reads are
    /// `LoadError::Storage` carrying the client's message.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, LoadError>;
}

#[async_trait::async_trait]
impl<T: Storage + ?Sized> Storage for Arc<T> {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, LoadError> {
        self.as_ref().get(bucket, key).await
    }
}
