use super::Storage;
use crate::LoadError;
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One `ObjectStore` per named bucket.
///
/// Only buckets registered up front are readable; anything else is
/// reported as a storage error rather than silently created.
pub struct Buckets(BTreeMap<String, Arc<dyn ObjectStore>>);

impl Buckets {
    /// S3 buckets, with credentials and region taken from the
    /// standard `AWS_*` environment variables.
    pub fn s3<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, LoadError> {
        names
            .into_iter()
            .map(|name| {
                AmazonS3Builder::from_env()
                    .with_bucket_name(name)
                    .build()
                    .map(|s3| (name.to_string(), Arc::new(s3) as Arc<dyn ObjectStore>))
                    .map_err(LoadError::storage)
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Local directory where each bucket is a subdirectory of `root`.
    pub fn local<'a>(
        root: &std::path::Path,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, LoadError> {
        names
            .into_iter()
            .map(|name| {
                LocalFileSystem::new_with_prefix(root.join(name))
                    .map(|fs| (name.to_string(), Arc::new(fs) as Arc<dyn ObjectStore>))
                    .map_err(LoadError::storage)
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    fn bucket(&self, name: &str) -> Result<&Arc<dyn ObjectStore>, LoadError> {
        self.0
            .get(name)
            .ok_or_else(|| LoadError::storage(format!("bucket {} is not configured", name)))
    }
}

#[async_trait::async_trait]
impl Storage for Buckets {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, LoadError> {
        self.bucket(bucket)?
            .get(&Path::from(key))
            .await
            .map_err(LoadError::storage)?
            .bytes()
            .await
            .map_err(LoadError::storage)
    }
}
