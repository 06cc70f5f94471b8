//! Dispatch pipeline: job channel → worker pool → hit channel → sink.

pub mod context;
pub mod orchestrator;
pub mod sink;
pub mod worker;

pub use context::{
    PipelineChannels, PipelineHandles, RunCounters, WorkerContext, create_pipeline_channels,
};
pub use orchestrator::{Phase, dispatch, prepare_run, run_pipeline, shutdown_pipeline};
pub use sink::{CollectSink, HitSink, WriterSink, spawn_sink};
pub use worker::{process_job, spawn_workers};
