use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use std::sync::atomic::Ordering;
use std::thread::{Builder, JoinHandle};

use crate::error::FuzzError;
use crate::{FetchOutcome, Hit, Job};

use super::context::WorkerContext;

/// Single worker: claim jobs until the channel is closed and empty (or cancel is set),
/// fetch, filter, send accepted hits on hit_tx.
fn worker_loop(id: usize, job_rx: Receiver<Job>, hit_tx: Sender<Hit>, ctx: WorkerContext) {
    while !ctx.cancel.load(Ordering::Relaxed) {
        let Ok(job) = job_rx.recv() else {
            break;
        };
        ctx.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        if let Some(hit) = process_job(id, job, &ctx)
            && hit_tx.send(hit).is_err()
        {
            break;
        }
    }
    drop(hit_tx);
}

/// Spawn exactly `num_threads` workers with ids `1..=num_threads`.
/// Caller keeps its own `hit_tx` and drops it only after joining these handles.
///
/// If the OS refuses a thread, the cancel flag is set, every worker already started is joined,
/// and [`FuzzError::Spawn`] is returned.
pub fn spawn_workers(
    job_rx: Receiver<Job>,
    hit_tx: &Sender<Hit>,
    ctx: &WorkerContext,
    num_threads: usize,
) -> Result<Vec<JoinHandle<()>>, FuzzError> {
    spawn_workers_with(job_rx, hit_tx, ctx, num_threads, |id| {
        Builder::new().name(format!("worker-{id}"))
    })
}

fn spawn_workers_with(
    job_rx: Receiver<Job>,
    hit_tx: &Sender<Hit>,
    ctx: &WorkerContext,
    num_threads: usize,
    builder: impl Fn(usize) -> Builder,
) -> Result<Vec<JoinHandle<()>>, FuzzError> {
    let mut handles = Vec::with_capacity(num_threads);
    for id in 1..=num_threads {
        let job_rx = job_rx.clone();
        let hit_tx = hit_tx.clone();
        let worker_ctx = ctx.clone();
        match builder(id).spawn(move || worker_loop(id, job_rx, hit_tx, worker_ctx)) {
            Ok(h) => handles.push(h),
            Err(source) => {
                warn!("worker {} of {} failed to start: {}", id, num_threads, source);
                ctx.cancel.store(true, Ordering::Relaxed);
                for h in handles {
                    let _ = h.join();
                }
                return Err(FuzzError::Spawn {
                    what: "worker",
                    source,
                });
            }
        }
    }
    Ok(handles)
}

/// Fetch one job and apply the filter. Transport failures are counted and dropped.
pub fn process_job(worker_id: usize, job: Job, ctx: &WorkerContext) -> Option<Hit> {
    let url = ctx.template.resolve(&job);
    match ctx.fetcher.fetch(&url) {
        FetchOutcome::Failure(err) => {
            ctx.counters.failed.fetch_add(1, Ordering::Relaxed);
            debug!("worker {}: {}", worker_id, err);
            None
        }
        FetchOutcome::Success {
            status_code,
            content_length,
        } => {
            if ctx.filter.accepts(status_code, content_length) {
                ctx.counters.accepted.fetch_add(1, Ordering::Relaxed);
                Some(Hit {
                    worker_id,
                    job,
                    status_code,
                    content_length,
                })
            } else {
                ctx.counters.filtered.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fetcher::Fetch;
    use crate::pipeline::{RunCounters, create_pipeline_channels};
    use crate::{FilterSpec, UrlTemplate};
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    struct Ok200;

    impl Fetch for Ok200 {
        fn fetch(&self, _url: &str) -> FetchOutcome {
            FetchOutcome::Success {
                status_code: 200,
                content_length: 1,
            }
        }
    }

    fn context() -> WorkerContext {
        WorkerContext {
            template: Arc::new(UrlTemplate::new("http://x.test/FUZZER").unwrap()),
            filter: Arc::new(FilterSpec::default()),
            fetcher: Arc::new(Ok200),
            cancel: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(RunCounters::default()),
        }
    }

    #[test]
    fn workers_are_named_by_id() {
        let ch = create_pipeline_channels(0);
        drop(ch.job_tx);
        let handles = spawn_workers(ch.job_rx, &ch.hit_tx, &context(), 3).unwrap();
        let names: Vec<_> = handles
            .iter()
            .map(|h| h.thread().name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["worker-1", "worker-2", "worker-3"]);
        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn refused_spawn_stops_and_joins_started_workers() {
        let ch = create_pipeline_channels(200);
        for i in 0..200 {
            ch.job_tx.send(format!("w{i}")).unwrap();
        }
        drop(ch.job_tx);
        let ctx = context();
        // No address space can back this stack, so the third spawn fails.
        let err = spawn_workers_with(ch.job_rx.clone(), &ch.hit_tx, &ctx, 4, |id| {
            let b = Builder::new();
            if id == 3 { b.stack_size(1 << 62) } else { b }
        })
        .unwrap_err();

        assert!(matches!(err, FuzzError::Spawn { what: "worker", .. }));
        assert!(ctx.cancel.load(Ordering::Relaxed));
        // Started workers were joined: the claimed and unclaimed jobs add up, and no worker
        // still holds a result sender.
        let claimed = ctx.counters.dispatched.load(Ordering::Relaxed);
        assert_eq!(claimed + ch.job_rx.len(), 200);
        drop(ch.hit_tx);
        assert_eq!(ch.hit_rx.iter().count(), claimed);
    }
}
