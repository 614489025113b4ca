//! # TrailPass Scheduler
//!
//! Runs a set of named jobs, each on its own fixed period, until an
//! explicit stop signal. Tokio timers only — zero overhead between ticks.
//!
//! ## Architecture
//! ```text
//! Scheduler::start(jobs)
//!   ├── one tokio task per job
//!   ├── tokio::time::interval (immediate first tick, fixed rate)
//!   │     overlapped ticks are skipped, never queued
//!   └── each tick runs in a failure boundary:
//!         action Err  → logged, job keeps its schedule
//!         action panic → contained, job keeps its schedule
//!
//! Scheduler::stop()    → all jobs cease scheduling future ticks
//! Scheduler::status()  → {running, jobs: [{name, periodSecs, runs}]}
//! ```
//!
//! Jobs are independent: they share nothing with each other beyond whatever
//! shared handles (e.g. the event store) their actions capture, so one
//! job's failure never reaches its siblings.

pub mod job;
pub mod runner;

pub use job::ScheduledJob;
pub use runner::{JobStatus, Scheduler, SchedulerStatus};
