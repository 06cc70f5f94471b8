//! Error type for the fuzzer library. The binary wraps these in `anyhow` at the CLI boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration, wordlist loading and per-request failures.
#[derive(Error, Debug)]
pub enum FuzzError {
    /// Missing or malformed run parameter. Fatal, raised before dispatch.
    #[error("{0}")]
    Config(String),

    /// Wordlist could not be opened.
    #[error("error opening file `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Wordlist opened but a read failed part-way; lines read so far are discarded.
    #[error("error reading file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Transport failure for a single job. Handled inside the worker, never returned from a run.
    #[error("request to `{url}` failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The OS refused a pipeline thread. Threads already started are stopped and joined first.
    #[error("could not start {what} thread: {source}")]
    Spawn {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    /// A pipeline thread panicked before it could be joined cleanly.
    #[error("{0} thread panicked")]
    Panicked(&'static str),
}

impl FuzzError {
    /// True for errors raised while loading the wordlist.
    pub fn is_load(&self) -> bool {
        matches!(self, FuzzError::Open { .. } | FuzzError::Read { .. })
    }
}
