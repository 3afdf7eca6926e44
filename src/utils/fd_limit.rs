//! Open-file limit lookup, used to keep the hash worker pool below EMFILE.

/// Descriptors held per hash worker: the open file plus a possible memory map, with slack for
/// the walk's directory handles.
pub const FDS_PER_WORKER: usize = 4;

/// Descriptors kept back for stdio, the report writer and the walk thread.
const RESERVED_FDS: usize = 16;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or not a Unix target.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // Safety: `rlim` is a valid, writable rlimit for the duration of the call.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) } != 0 {
        return None;
    }
    match rlim.rlim_cur {
        libc::RLIM_INFINITY => None,
        cur => u64::try_from(cur).ok(),
    }
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Largest worker count that fits in 80% of the soft limit (less the reserved descriptors),
/// at least 1. `None` when there is no limit to respect.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = usize::try_from(max_open_fds()?).unwrap_or(usize::MAX);
    let usable = (limit / 5 * 4).saturating_sub(RESERVED_FDS);
    Some((usable / FDS_PER_WORKER).max(1))
}
