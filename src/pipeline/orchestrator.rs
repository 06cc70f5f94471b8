use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::engine::fetcher::Fetch;
use crate::engine::wordlist::WordSource;
use crate::error::FuzzError;
use crate::pipeline::{self, HitSink, PipelineHandles, RunCounters, WorkerContext};
use crate::{FilterSpec, RunConfig, RunStats, UrlTemplate, validate_threads};

/// Dispatcher lifecycle. Transitions are strictly in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Dispatching,
    Draining,
    Done,
}

fn enter(phase: Phase) {
    debug!("dispatcher: {:?}", phase);
}

/// Idle → Loading: validate template and thread count, then load jobs.
/// Any failure here aborts before a single request is sent.
pub fn prepare_run<W: WordSource + ?Sized>(
    threads: i64,
    host: &str,
    filter: FilterSpec,
    words: &W,
) -> Result<RunConfig, FuzzError> {
    enter(Phase::Idle);
    let url_template = UrlTemplate::new(host)?;
    validate_threads(threads)?;

    enter(Phase::Loading);
    let jobs = words.load()?;
    debug!("loaded {} jobs", jobs.len());
    RunConfig::new(threads, url_template, filter, jobs)
}

/// Dispatching: pre-fill and close the job channel, start the sink, then start the workers.
/// Caller must hand the result to [`shutdown_pipeline`]. A thread the OS refuses to start
/// fails the run with every thread already started joined.
pub fn run_pipeline<S: HitSink + 'static>(
    config: RunConfig,
    fetcher: Arc<dyn Fetch>,
    sink: S,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<PipelineHandles<S>, FuzzError> {
    enter(Phase::Dispatching);
    let started = Instant::now();
    let RunConfig {
        threads,
        url_template,
        filter,
        jobs,
    } = config;
    let job_count = jobs.len();

    let channels = pipeline::create_pipeline_channels(job_count);
    for job in jobs {
        if channels.job_tx.send(job).is_err() {
            break;
        }
    }
    // Closed before any worker starts: a worker exits as soon as it sees the channel empty.
    drop(channels.job_tx);

    let sink_handle = pipeline::spawn_sink(channels.hit_rx, sink)?;

    let cancel = cancel.unwrap_or_default();
    let counters = Arc::new(RunCounters::default());
    let ctx = WorkerContext {
        template: Arc::new(url_template),
        filter: Arc::new(filter),
        fetcher,
        cancel: Arc::clone(&cancel),
        counters: Arc::clone(&counters),
    };
    let worker_handles =
        match pipeline::spawn_workers(channels.job_rx, &channels.hit_tx, &ctx, threads) {
            Ok(handles) => handles,
            Err(e) => {
                drop(channels.hit_tx);
                let _ = sink_handle.join();
                return Err(e);
            }
        };
    debug!("{} workers started for {} jobs", threads, job_count);

    Ok(PipelineHandles {
        worker_handles,
        sink_handle,
        hit_tx: channels.hit_tx,
        counters,
        cancel,
        job_count,
        started,
    })
}

/// Draining → Done: join every worker, close the hit channel, join the sink.
/// Returns run stats and the sink (so collected hits can be read back).
pub fn shutdown_pipeline<S: HitSink + 'static>(
    handles: PipelineHandles<S>,
) -> Result<(RunStats, S), FuzzError> {
    let PipelineHandles {
        worker_handles,
        sink_handle,
        hit_tx,
        counters,
        cancel,
        job_count,
        started,
    } = handles;

    enter(Phase::Draining);
    let mut worker_panicked = false;
    for h in worker_handles {
        worker_panicked |= h.join().is_err();
    }
    // Every worker sender is gone; dropping ours closes the channel and lets the sink finish.
    drop(hit_tx);
    let sink = sink_handle
        .join()
        .map_err(|_| FuzzError::Panicked("sink"))?;
    if worker_panicked {
        return Err(FuzzError::Panicked("worker"));
    }

    enter(Phase::Done);
    let stats = counters.snapshot(job_count, cancel.load(Ordering::Relaxed), started.elapsed());
    debug!(
        "dispatched {}/{} jobs: {} accepted, {} filtered, {} failed",
        stats.dispatched, stats.jobs, stats.accepted, stats.filtered, stats.failed
    );
    Ok((stats, sink))
}

/// Dispatch a prepared run to completion.
pub fn dispatch<S: HitSink + 'static>(
    config: RunConfig,
    fetcher: Arc<dyn Fetch>,
    sink: S,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<(RunStats, S), FuzzError> {
    shutdown_pipeline(run_pipeline(config, fetcher, sink, cancel)?)
}
