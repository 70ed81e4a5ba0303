//! Background job to record connection pool metrics.

use sqlx::PgPool;
use tracing::{debug, warn};

use super::scheduler::{Job, JobFrequency};

/// How often pool gauges are refreshed.
const POOL_METRICS_INTERVAL_SECS: u64 = 10;

/// Job that periodically records database connection pool metrics.
pub struct PoolMetricsJob {
    pool: PgPool,
}

impl PoolMetricsJob {
    /// Create a new pool metrics job.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(POOL_METRICS_INTERVAL_SECS)
    }

    async fn execute(&self) -> anyhow::Result<()> {
        if self.pool.is_closed() {
            anyhow::bail!("connection pool is closed");
        }
        let snapshot = persistence::metrics::record_pool_metrics(&self.pool);
        if snapshot.max > 0 && snapshot.in_use() == snapshot.max {
            warn!(max = snapshot.max, "Connection pool exhausted");
        } else {
            debug!(in_use = snapshot.in_use(), idle = snapshot.idle, "Pool metrics recorded");
        }
        Ok(())
    }
}
