//! The scheduler itself — spawns, supervises, and stops job loops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::job::ScheduledJob;

/// Supervises a set of periodic jobs. `start` is idempotent while running,
/// `stop` is idempotent always, and `status` is safe from any task.
pub struct Scheduler {
    inner: Mutex<Inner>,
}

struct Inner {
    /// Present while running; dropping/sending signals every job loop.
    stop_tx: Option<watch::Sender<bool>>,
    jobs: Vec<JobHandle>,
}

struct JobHandle {
    name: String,
    period: Duration,
    runs: Arc<AtomicU64>,
}

/// Point-in-time scheduler snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub running: bool,
    pub jobs: Vec<JobStatus>,
}

/// Per-job slice of the snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub name: String,
    pub period_secs: u64,
    /// Completed tick count (including failed ticks).
    pub runs: u64,
}

impl Scheduler {
    /// Create a stopped scheduler with no jobs.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                stop_tx: None,
                jobs: Vec::new(),
            }),
        }
    }

    /// Launch one loop per job. Each job ticks immediately, then at a fixed
    /// rate from its start. Calling `start` while already running is a
    /// logged no-op — the running jobs are left untouched.
    pub fn start(&self, jobs: Vec<ScheduledJob>) {
        let mut inner = self.inner.lock().unwrap();
        if inner.stop_tx.is_some() {
            tracing::info!("⏰ Scheduler already running — start ignored");
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            let runs = Arc::new(AtomicU64::new(0));
            handles.push(JobHandle {
                name: job.name.clone(),
                period: job.period,
                runs: runs.clone(),
            });
            tokio::spawn(run_job(job, stop_rx.clone(), runs));
        }

        tracing::info!("⏰ Scheduler started ({} job(s))", handles.len());
        inner.jobs = handles;
        inner.stop_tx = Some(stop_tx);
    }

    /// Signal every job loop to cease scheduling future ticks. A tick
    /// already executing is not interrupted. Safe to call repeatedly.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        match inner.stop_tx.take() {
            Some(stop_tx) => {
                let _ = stop_tx.send(true);
                tracing::info!("⏹ Scheduler stopped");
            }
            None => tracing::debug!("Scheduler already stopped"),
        }
    }

    /// Whether jobs are currently scheduled.
    pub fn is_running(&self) -> bool {
        self.inner.lock().unwrap().stop_tx.is_some()
    }

    /// Snapshot of the running state and per-job tick counters. After a
    /// stop the last job set is still reported, with `running: false`.
    pub fn status(&self) -> SchedulerStatus {
        let inner = self.inner.lock().unwrap();
        SchedulerStatus {
            running: inner.stop_tx.is_some(),
            jobs: inner
                .jobs
                .iter()
                .map(|handle| JobStatus {
                    name: handle.name.clone(),
                    period_secs: handle.period.as_secs(),
                    runs: handle.runs.load(Ordering::Relaxed),
                })
                .collect(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// One job's loop: tick, run the action inside a failure boundary, repeat
/// until the stop signal. `MissedTickBehavior::Skip` plus awaiting the
/// action inline means an execution that overruns its period drops the
/// overlapped ticks instead of queueing them.
async fn run_job(job: ScheduledJob, mut stop_rx: watch::Receiver<bool>, runs: Arc<AtomicU64>) {
    let mut ticker = tokio::time::interval(job.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!("▶️ Job '{}' scheduled every {:?}", job.name, job.period);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => {
                tracing::info!("⏹ Job '{}' stopped", job.name);
                break;
            }
            _ = ticker.tick() => {
                // The tick runs in its own task so a panic inside the
                // action is contained and later ticks still fire.
                match tokio::spawn((job.action)()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::warn!("⚠️ Job '{}' failed: {e}", job.name),
                    Err(e) => tracing::error!("💥 Job '{}' panicked: {e}", job.name),
                }
                runs.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_job(name: &str, period_ms: u64, counter: Arc<AtomicU64>) -> ScheduledJob {
        ScheduledJob::new(name, Duration::from_millis(period_ms), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicU64::new(0));
        // Period is a minute; the only tick inside the window is the
        // immediate one.
        sched.start(vec![counting_job("slow", 60_000, count.clone())]);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        sched.stop();
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicU64::new(0));
        sched.start(vec![counting_job("tick", 50, count.clone())]);
        sched.start(vec![counting_job("tick", 50, count.clone())]);
        tokio::time::sleep(Duration::from_millis(230)).await;
        sched.stop();

        // One instance: immediate tick plus ~4 periods. A duplicated
        // instance would roughly double this.
        let runs = count.load(Ordering::SeqCst);
        assert!((3..=7).contains(&runs), "unexpected run count {runs}");
        assert_eq!(sched.status().jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_ceases_ticking_and_is_idempotent() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicU64::new(0));
        sched.start(vec![counting_job("tick", 30, count.clone())]);
        tokio::time::sleep(Duration::from_millis(100)).await;
        sched.stop();
        sched.stop();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let after_stop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
        assert!(!sched.status().running);
    }

    #[tokio::test]
    async fn test_failing_job_degrades_only_itself() {
        let sched = Scheduler::new();
        let good = Arc::new(AtomicU64::new(0));
        let bad = Arc::new(AtomicU64::new(0));
        let bad_counter = bad.clone();
        let failing = ScheduledJob::new("failing", Duration::from_millis(30), move || {
            let bad = bad_counter.clone();
            async move {
                bad.fetch_add(1, Ordering::SeqCst);
                anyhow::bail!("simulated failure")
            }
        });

        sched.start(vec![failing, counting_job("good", 30, good.clone())]);
        tokio::time::sleep(Duration::from_millis(170)).await;
        sched.stop();

        assert!(good.load(Ordering::SeqCst) >= 2, "sibling job stalled");
        // Later ticks of the failing job itself still fire on schedule.
        assert!(bad.load(Ordering::SeqCst) >= 2, "failing job stopped ticking");
        assert!(!sched.status().running);
    }

    #[tokio::test]
    async fn test_panicking_job_is_contained() {
        let sched = Scheduler::new();
        let good = Arc::new(AtomicU64::new(0));
        let attempts = Arc::new(AtomicU64::new(0));
        let attempts_counter = attempts.clone();
        let panicking = ScheduledJob::new("panicking", Duration::from_millis(30), move || {
            let attempts = attempts_counter.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                panic!("simulated panic");
            }
        });

        sched.start(vec![panicking, counting_job("good", 30, good.clone())]);
        tokio::time::sleep(Duration::from_millis(170)).await;
        sched.stop();

        assert!(good.load(Ordering::SeqCst) >= 2, "sibling job stalled");
        assert!(attempts.load(Ordering::SeqCst) >= 2, "panicking job stopped ticking");
    }

    #[tokio::test]
    async fn test_status_snapshot() {
        let sched = Scheduler::new();
        assert!(!sched.status().running);
        assert!(sched.status().jobs.is_empty());

        let count = Arc::new(AtomicU64::new(0));
        sched.start(vec![
            counting_job("alpha", 10_000, count.clone()),
            counting_job("beta", 20_000, count.clone()),
        ]);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let status = sched.status();
        assert!(status.running);
        let names: Vec<&str> = status.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert_eq!(status.jobs[0].period_secs, 10);
        // Both jobs have fired their immediate tick.
        assert!(status.jobs.iter().all(|j| j.runs >= 1));

        sched.stop();
        assert!(!sched.status().running);
        assert_eq!(sched.status().jobs.len(), 2);
    }
}
