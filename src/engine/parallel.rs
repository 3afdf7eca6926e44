//! Shared helpers for parallel processing.

use log::debug;

use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::max_workers_by_fd_limit;

pub fn parallel_walk_handler(parallel_walk: bool) {
    if parallel_walk {
        debug!("Walking in parallel");
    } else {
        debug!("Walking serially");
    }
}

/// Hash worker count for a run: the requested count, or available parallelism minus one;
/// never below 1 and capped by the FD limit.
pub fn resolve_worker_count(requested: Option<usize>) -> usize {
    let limits = WorkerThreadLimits::current();
    let workers = requested
        .unwrap_or_else(|| limits.default_workers())
        .max(limits.floor);
    match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < workers => {
            debug!("Capping workers {} -> {} (FD limit ~80%)", workers, fd_cap);
            fd_cap
        }
        _ => workers,
    }
}
