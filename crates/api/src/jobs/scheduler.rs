//! Periodic background jobs with cooperative shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Consecutive failures after which a job's errors are logged at error level.
const FAILURE_ESCALATION: u32 = 3;

/// How often a job runs.
#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    Seconds(u64),
    Minutes(u64),
}

impl JobFrequency {
    /// Interval between runs. Never shorter than one second.
    pub fn duration(&self) -> Duration {
        let secs = match self {
            JobFrequency::Seconds(secs) => *secs,
            JobFrequency::Minutes(mins) => mins.saturating_mul(60),
        };
        Duration::from_secs(secs.max(1))
    }
}

/// A unit of periodic background work.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Stable name used in logs and metric labels.
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    async fn execute(&self) -> anyhow::Result<()>;
}

/// Runs each registered job on its own tokio task.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Spawn a task per job. The first run happens one interval after start.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting job scheduler");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_tx.subscribe();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signal every job to stop after its current run. Returns immediately.
    pub fn shutdown(&self) {
        info!("Stopping job scheduler");
        self.shutdown_tx.send_replace(true);
    }

    /// Wait for job tasks to finish, giving up after `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let handles = self.handles;
        let joined = async {
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        match tokio::time::timeout(timeout, joined).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!(timeout_secs = timeout.as_secs(), "Job shutdown timed out"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let period = job.frequency().duration();

    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    // A slow run delays the next one instead of triggering a burst
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(job = name, period_secs = period.as_secs(), "Job scheduled");

    let mut consecutive_failures: u32 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = Instant::now();
                let outcome = job.execute().await;
                let elapsed_ms = start.elapsed().as_millis();

                match outcome {
                    Ok(()) => {
                        if consecutive_failures > 0 {
                            info!(job = name, after = consecutive_failures, "Job recovered");
                        }
                        consecutive_failures = 0;
                        debug!(job = name, elapsed_ms, "Job run finished");
                    }
                    Err(e) => {
                        consecutive_failures += 1;
                        if consecutive_failures >= FAILURE_ESCALATION {
                            error!(job = name, elapsed_ms, consecutive_failures, error = %e, "Job keeps failing");
                        } else {
                            warn!(job = name, elapsed_ms, error = %e, "Job run failed");
                        }
                    }
                }

                metrics::counter!(
                    "hotel_booking_job_runs_total",
                    "job" => name,
                    "outcome" => if consecutive_failures == 0 { "ok" } else { "error" }
                )
                .increment(1);
            }
            changed = shutdown_rx.changed() => {
                // A dropped sender also means the scheduler is gone
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!(job = name, "Job stopping");
                    break;
                }
            }
        }
    }
}
