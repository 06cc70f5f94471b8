//! Public and internal types for the fuzzer API and pipeline.

use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::error::FuzzError;
use crate::utils::config::{DEFAULT_THREADS, PLACEHOLDER};

/// One wordlist entry queued for processing.
pub type Job = String;

/// URL containing the [`PLACEHOLDER`] token at least once.
///
/// Only the first placeholder is substituted per job; any later occurrences are sent as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, FuzzError> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(FuzzError::Config(format!(
                "missing {PLACEHOLDER} word at hostname parameter, use --help"
            )));
        }
        Ok(Self(template))
    }

    /// URL for `job`: first placeholder replaced.
    pub fn resolve(&self, job: &str) -> String {
        self.0.replacen(PLACEHOLDER, job, 1)
    }

    /// Template with every placeholder stripped, for the `HOST:` header line.
    pub fn display_host(&self) -> String {
        self.0.replace(PLACEHOLDER, "")
    }
}

/// What a single GET produced. Consumed by the filter inside the same worker.
#[derive(Debug)]
pub enum FetchOutcome {
    /// `content_length` is -1 when the server did not declare one.
    Success { status_code: u16, content_length: i64 },
    Failure(FuzzError),
}

/// Exclusion sets. A response is hidden when either its status or its length is listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub hidden_status_codes: HashSet<u16>,
    pub hidden_content_lengths: HashSet<i64>,
}

/// An accepted response, moved from a worker to the result sink.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Hit {
    pub worker_id: usize,
    pub job: Job,
    pub status_code: u16,
    pub content_length: i64,
}

/// Everything a dispatch needs. Built once by [`prepare_run`](crate::pipeline::prepare_run), immutable after.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub threads: usize,
    pub url_template: UrlTemplate,
    pub filter: FilterSpec,
    pub jobs: Vec<Job>,
}

impl RunConfig {
    pub fn new(
        threads: i64,
        url_template: UrlTemplate,
        filter: FilterSpec,
        jobs: Vec<Job>,
    ) -> Result<Self, FuzzError> {
        Ok(Self {
            threads: validate_threads(threads)?,
            url_template,
            filter,
            jobs,
        })
    }
}

/// Thread count must be at least 1; zero workers would never drain the job channel.
pub fn validate_threads(threads: i64) -> Result<usize, FuzzError> {
    usize::try_from(threads)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            FuzzError::Config(format!(
                "invalid thread count {threads}: must be at least 1"
            ))
        })
}

/// Aggregate counts and timing for a finished run.
///
/// `dispatched == accepted + filtered + failed`. Without cancellation `dispatched == jobs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub jobs: usize,
    pub dispatched: usize,
    pub accepted: usize,
    pub filtered: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// How accepted results are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Color,
    Plain,
    Json,
}

/// Lib-only options for [`fuzz`](crate::fuzz).
#[derive(Clone, Debug)]
pub struct FuzzOpts {
    /// Worker count. Validated at run start; values below 1 are rejected.
    pub threads: i64,
    pub hidden_status_codes: Vec<u16>,
    pub hidden_content_lengths: Vec<i64>,
    /// Per-request timeout. When None the HTTP client's default applies.
    pub timeout: Option<Duration>,
    /// Set to stop workers from claiming further jobs.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for FuzzOpts {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            hidden_status_codes: Vec::new(),
            hidden_content_lengths: Vec::new(),
            timeout: None,
            cancel: None,
        }
    }
}

impl FuzzOpts {
    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            hidden_status_codes: self.hidden_status_codes.iter().copied().collect(),
            hidden_content_lengths: self.hidden_content_lengths.iter().copied().collect(),
        }
    }
}

impl From<&Opts> for FuzzOpts {
    fn from(o: &Opts) -> Self {
        FuzzOpts {
            threads: o.threads,
            hidden_status_codes: o.hidden_status_codes.clone(),
            hidden_content_lengths: o.hidden_content_lengths.clone(),
            timeout: o.timeout,
            cancel: None,
        }
    }
}

/// Full options (CLI merged over `.fuzzer.toml`). Use [`FuzzOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Worker count (`--threads`).
    pub threads: i64,
    /// URL template (`--host`). Required; checked before dispatch.
    pub host: Option<String>,
    /// Wordlist path (`--file`). Required; checked before dispatch.
    pub file: Option<PathBuf>,
    /// Hidden status codes (`--hdc`).
    pub hidden_status_codes: Vec<u16>,
    /// Hidden content lengths (`--hcl`).
    pub hidden_content_lengths: Vec<i64>,
    /// Per-request timeout (`--timeout`, seconds).
    pub timeout: Option<Duration>,
    pub output: OutputMode,
    /// Debug logging, per-request failure logging and the final summary.
    pub verbose: bool,
    /// Print the ASCII banner before the run.
    pub banner: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            host: None,
            file: None,
            hidden_status_codes: Vec::new(),
            hidden_content_lengths: Vec::new(),
            timeout: None,
            output: OutputMode::Color,
            verbose: false,
            banner: true,
        }
    }
}
