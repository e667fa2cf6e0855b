//! CPU thread budget for the tensor backend.

use std::num::NonZeroUsize;

use crate::error::{DeviceError, Result};

/// Upper bound on the default thread count.
pub const MAX_DEFAULT_THREADS: usize = 4;

/// Number of CPUs this process may use, if the platform can tell.
///
/// On Linux this honours cgroup CPU quotas and affinity masks.
pub fn available_cpus() -> Option<usize> {
    std::thread::available_parallelism()
        .ok()
        .map(NonZeroUsize::get)
}

/// Default thread count for `cpus` CPUs: half of them, capped at
/// [`MAX_DEFAULT_THREADS`], never below one.
pub fn default_num_threads(cpus: usize) -> usize {
    (cpus / 2).clamp(1, MAX_DEFAULT_THREADS)
}

/// Resolve the thread count to apply.
///
/// An explicit request must be at least one. Without one, the default is
/// derived from the available CPUs; `None` means leave the backend alone.
pub fn resolve_num_threads(requested: Option<usize>) -> Result<Option<usize>> {
    match requested {
        Some(0) => Err(DeviceError::InvalidThreads(0)),
        Some(n) => Ok(Some(n)),
        None => Ok(available_cpus().map(default_num_threads)),
    }
}
