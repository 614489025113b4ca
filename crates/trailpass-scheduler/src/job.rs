//! Job definitions — the unit of recurring work.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

/// The work a job performs on each tick. Errors are caught and logged at
/// the tick boundary; nothing downstream consumes the result.
pub type JobAction = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// A named unit of recurring work.
pub struct ScheduledJob {
    /// Human-readable name, used in logs and status snapshots.
    pub name: String,
    /// Fixed tick period, measured from job start.
    pub period: Duration,
    pub(crate) action: JobAction,
}

impl ScheduledJob {
    /// Create a job from an async closure. The closure is called once per
    /// tick and must produce a fresh future each time.
    pub fn new<F, Fut>(name: &str, period: Duration, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            period,
            action: Arc::new(move || -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(action())
            }),
        }
    }
}

impl std::fmt::Debug for ScheduledJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledJob")
            .field("name", &self.name)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}
