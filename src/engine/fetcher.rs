//! Single-request HTTP fetch. One GET, no retry; the body is drained and dropped.

use log::debug;
use std::io::{self, Read};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};

use crate::FetchOutcome;
use crate::error::FuzzError;
use crate::utils::config::MAX_DRAIN_BYTES;

/// Performs the request for one resolved URL. Shared by every worker, so it must be `Sync`.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// [`Fetch`] over a shared [`reqwest::blocking::Client`]; all workers reuse its connection pool.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Client with library defaults, plus a per-request timeout when given.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FuzzError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| FuzzError::Config(format!("could not build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        let mut response = match self.client.get(url).send() {
            Ok(r) => r,
            Err(source) => {
                return FetchOutcome::Failure(FuzzError::Request {
                    url: url.to_string(),
                    source,
                });
            }
        };
        let status = response.status();
        let content_length = response_content_length(status, response.headers());
        // Drain so the connection goes back to the pool. Status and length are already known.
        if let Err(e) = io::copy(&mut (&mut response).take(MAX_DRAIN_BYTES), &mut io::sink()) {
            debug!("{}: body read failed: {}", url, e);
        }
        FetchOutcome::Success {
            status_code: status.as_u16(),
            content_length,
        }
    }
}

/// Length reported for a response: 0 for statuses that never carry a body (1xx, 204, 304),
/// otherwise the declared header value.
pub fn response_content_length(status: StatusCode, headers: &HeaderMap) -> i64 {
    if status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
    {
        return 0;
    }
    declared_content_length(headers)
}

/// Content-Length as sent by the server, or -1 when absent or unparsable (e.g. chunked).
pub fn declared_content_length(headers: &HeaderMap) -> i64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(-1)
}
