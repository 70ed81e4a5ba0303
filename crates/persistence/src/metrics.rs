//! Query and connection pool metrics.
//!
//! Every repository call is wrapped in a [`QueryTimer`]; pool gauges are
//! refreshed by the API's background job.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::{Duration, Instant};

/// Histogram of repository query latency, labelled by query name.
pub const QUERY_DURATION_METRIC: &str = "hotel_booking_db_query_duration_seconds";

/// Record how long a named query took.
pub fn record_query_duration(query_name: &'static str, elapsed: Duration) {
    histogram!(QUERY_DURATION_METRIC, "query" => query_name).record(elapsed.as_secs_f64());
}

/// Point-in-time view of the connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub size: u32,
    pub idle: u32,
    pub max: u32,
}

impl PoolSnapshot {
    pub fn of(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle() as u32,
            max: pool.options().get_max_connections(),
        }
    }

    /// Connections currently checked out by callers.
    pub fn in_use(&self) -> u32 {
        self.size.saturating_sub(self.idle)
    }
}

/// Publish pool gauges and return the snapshot they were taken from.
pub fn record_pool_metrics(pool: &PgPool) -> PoolSnapshot {
    let snapshot = PoolSnapshot::of(pool);

    gauge!("hotel_booking_db_connections_in_use").set(f64::from(snapshot.in_use()));
    gauge!("hotel_booking_db_connections_idle").set(f64::from(snapshot.idle));
    gauge!("hotel_booking_db_connections_open").set(f64::from(snapshot.size));
    gauge!("hotel_booking_db_connections_max").set(f64::from(snapshot.max));

    snapshot
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_booking_by_id");
/// let result = sqlx::query_as::<_, BookingEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
#[must_use = "a timer records nothing until `record` is called"]
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Record the elapsed time and return it.
    pub fn record(self) -> Duration {
        let elapsed = self.start.elapsed();
        record_query_duration(self.query_name, elapsed);
        elapsed
    }
}
