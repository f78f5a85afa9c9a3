use crate::LoadError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Absolute cut-off shared by every outbound call of one invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A timeout too large for the clock leaves the call unbounded.
    pub fn after(timeout: Option<Duration>) -> Self {
        Self(timeout.and_then(|t| Instant::now().checked_add(t)))
    }

    /// Runs `fut`, giving up with `LoadError::Deadline(step)` once the
    /// deadline passes. The abandoned call is dropped, not cancelled
    /// server-side.
    pub async fn bound<T, F>(&self, step: &'static str, fut: F) -> Result<T, LoadError>
    where
        F: Future<Output = Result<T, LoadError>>,
    {
        match self.0 {
            None => fut.await,
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| LoadError::Deadline(step))?,
        }
    }
}
