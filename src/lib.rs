//! fuzzer: concurrent HTTP path discovery over a fixed worker pool

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::FuzzError;

use log::debug;
use std::sync::Arc;

use engine::{HttpFetcher, WordSource};
use pipeline::CollectSink;

/// Result alias used by public fuzzer API
pub type Result<T> = std::result::Result<T, FuzzError>;

/// Single entry point: substitute each word from `words` into `host`, fetch, filter, and
/// return the accepted hits (arrival order) with run stats.
///
/// `host` must contain [`PLACEHOLDER`](utils::config::PLACEHOLDER). For streaming output or a custom
/// fetcher, use [`pipeline::prepare_run`] and [`pipeline::dispatch`] directly.
///
/// ```ignore
/// let words = vec!["admin".to_string(), "login".to_string()];
/// let opts = fuzzer::FuzzOpts { threads: 4, hidden_status_codes: vec![404], ..Default::default() };
/// let (hits, stats) = fuzzer::fuzz("http://127.0.0.1:8080/FUZZER", &words, &opts)?;
/// ```
pub fn fuzz<W: WordSource + ?Sized>(
    host: &str,
    words: &W,
    opts: &FuzzOpts,
) -> Result<(Vec<Hit>, RunStats)> {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    let config = pipeline::prepare_run(opts.threads, host, opts.filter(), words)?;
    let fetcher = Arc::new(HttpFetcher::new(opts.timeout)?);
    let (stats, sink) =
        pipeline::dispatch(config, fetcher, CollectSink::default(), opts.cancel.clone())?;
    Ok((sink.hits, stats))
}
