//! Background job scheduler and job implementations.

mod pool_metrics;
mod scheduler;

pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
