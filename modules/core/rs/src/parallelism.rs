use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Negative values count back from the number of available cores: -1 means "all cores".
fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(_normalize(requested, max))
}

/// Build a dedicated rayon pool with the normalized number of threads.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let threads = available(requested)?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|ind| format!("svbit-worker-{ind}"))
        .build()?;
    Ok(pool)
}
