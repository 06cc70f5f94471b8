//! Application configuration constants.
//! Tokens, defaults and channel sizing in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Config file looked up in the working directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- URL template ----

/// Marker in `--host` replaced by each wordlist entry.
pub const PLACEHOLDER: &str = "FUZZER";

// ---- Worker threads ----

/// Worker count when neither CLI nor config file sets one.
pub const DEFAULT_THREADS: i64 = 1;

// ---- Channels ----

/// Channel sizing for the dispatch pipeline.
pub struct ChannelCaps;

impl ChannelCaps {
    /// Floor for the job channel. crossbeam treats capacity 0 as a rendezvous channel, which
    /// would block the pre-fill on an empty wordlist.
    pub const MIN_JOB_CAP: usize = 1;
    /// Result channel capacity. The sink drains concurrently so this only smooths bursts.
    pub const RESULT_CAP: usize = 1024;
}

// ---- HTTP ----

/// Body bytes read after the headers so the connection can be reused. Anything longer is
/// abandoned and the connection closed.
pub const MAX_DRAIN_BYTES: u64 = 1 << 20;

// ---- Output ----

/// Status code rendered in green; everything else is red.
pub const STATUS_OK: u16 = 200;
