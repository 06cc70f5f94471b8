//! File descriptor limit detection for sizing the worker pool (Unix).

/// Estimated descriptors held per worker: one pooled socket plus resolver/TLS slack.
pub const FDS_PER_WORKER: usize = 2;

/// Fraction of the process FD limit to use (leave headroom for stdio, the wordlist, logs).
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Returns the soft limit for max open file descriptors, or `None` if unavailable (e.g. Windows).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    // RLIM_INFINITY is typically !0 or u64::MAX; treat as "no practical limit"
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Largest worker count that stays under ~80% of the FD limit, or `None` when there is no limit.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}

/// Warn when `threads` concurrent connections would likely hit EMFILE. The pool is not resized.
pub fn warn_if_over_fd_limit(threads: usize) -> bool {
    match max_workers_by_fd_limit() {
        Some(max) if threads > max => {
            log::warn!(
                "{} threads may exceed the open file limit (suggested max {}); requests may fail with EMFILE",
                threads,
                max
            );
            true
        }
        _ => false,
    }
}
