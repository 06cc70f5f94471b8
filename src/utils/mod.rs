pub mod config;
pub mod fd_limit;
pub(crate) mod fuzzer_toml;
pub mod logger;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit, warn_if_over_fd_limit};
pub use logger::setup_logging;
