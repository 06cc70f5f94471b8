//! Pipeline context: channels, shared read-only worker state and run counters.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::engine::fetcher::Fetch;
use crate::utils::config::ChannelCaps;
use crate::{FilterSpec, Hit, Job, RunStats, UrlTemplate};

/// Per-outcome counters, bumped by workers with relaxed atomics and read once after the join.
#[derive(Debug, Default)]
pub struct RunCounters {
    pub dispatched: AtomicUsize,
    pub accepted: AtomicUsize,
    pub filtered: AtomicUsize,
    pub failed: AtomicUsize,
}

impl RunCounters {
    pub fn snapshot(&self, jobs: usize, cancel_requested: bool, elapsed: Duration) -> RunStats {
        let dispatched = self.dispatched.load(Ordering::Relaxed);
        RunStats {
            jobs,
            dispatched,
            accepted: self.accepted.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: cancel_requested && dispatched < jobs,
            elapsed,
        }
    }
}

/// Shared state handed to every worker. Everything here is read-only except the counters.
#[derive(Clone)]
pub struct WorkerContext {
    pub template: Arc<UrlTemplate>,
    pub filter: Arc<FilterSpec>,
    pub fetcher: Arc<dyn Fetch>,
    pub cancel: Arc<AtomicBool>,
    pub counters: Arc<RunCounters>,
}

/// Job and hit channels. The job channel holds the whole wordlist so the pre-fill never blocks.
pub struct PipelineChannels {
    pub job_tx: Sender<Job>,
    pub job_rx: Receiver<Job>,
    pub hit_tx: Sender<Hit>,
    pub hit_rx: Receiver<Hit>,
}

pub fn create_pipeline_channels(job_count: usize) -> PipelineChannels {
    let (job_tx, job_rx) = bounded::<Job>(job_count.max(ChannelCaps::MIN_JOB_CAP));
    let (hit_tx, hit_rx) = bounded::<Hit>(ChannelCaps::RESULT_CAP);
    PipelineChannels {
        job_tx,
        job_rx,
        hit_tx,
        hit_rx,
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline). `hit_tx` is the dispatcher's own
/// sender: it is dropped only after every worker has been joined, which closes the hit channel.
pub struct PipelineHandles<S> {
    pub worker_handles: Vec<JoinHandle<()>>,
    pub sink_handle: JoinHandle<S>,
    pub hit_tx: Sender<Hit>,
    pub counters: Arc<RunCounters>,
    pub cancel: Arc<AtomicBool>,
    pub job_count: usize,
    pub started: Instant,
}
