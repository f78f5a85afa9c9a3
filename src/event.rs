//! S3 object-created notifications.
use crate::LoadError;
use crate::Logger;
use crate::loader::Loader;
use crate::storage::Storage;
use crate::warehouse::Warehouse;
use serde::Deserialize;
use serde::Serialize;

/// Notification document as delivered by S3. Only the fields the
/// loader reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "responseElements", default)]
    pub response: ResponseElements,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseElements {
    #[serde(rename = "x-amz-request-id")]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3Event {
    /// Event for a plain list of object keys.
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            records: keys
                .into_iter()
                .map(|key| S3EventRecord {
                    response: ResponseElements::default(),
                    s3: S3Entity {
                        object: S3Object { key: key.into() },
                    },
                })
                .collect(),
        }
    }
}

impl TryFrom<&str> for S3Event {
    type Error = serde_json::Error;
    fn try_from(json: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(json)
    }
}

/// Result reported back to the invoker when every record loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Response {
    pub success: bool,
}

/// Loads every record of `event`, in order.
///
/// A failing record does not stop the ones after it. Each failure is
/// logged; the first one is returned once all records were attempted.
pub async fn handle<S, W>(loader: &Loader<S, W>, logger: &Logger, event: &S3Event) -> Result<Response, LoadError>
where
    S: Storage,
    W: Warehouse,
{
    let mut first = None;
    for record in event.records.iter() {
        let ref key = record.s3.object.key;
        let logger = match record.response.request_id {
            Some(ref id) => logger.with("s3_request_id", id),
            None => logger.clone(),
        };
        if let Err(e) = loader.load(&logger, key).await {
            logger.error("load failed", &[("key", key), ("err", &e)]);
            first = first.or(Some(e));
        }
    }
    match first {
        Some(e) => Err(e),
        None => Ok(Response { success: true }),
    }
}
