use std::sync::OnceLock;

use crate::env::env_value;

/// Environment variable which overrides the size of the default thread pool.
pub const NUM_THREADS_ENV_VAR: &str = "SPRITE_NUM_THREADS";

/// A wrapper around the Rayon thread pool used to analyze images.
///
/// If the pool could not be created, operations run directly on the calling
/// thread.
#[derive(Debug)]
pub struct ThreadPool {
    /// The wrapped thread pool, or None if we failed to construct one.
    pool: Option<rayon::ThreadPool>,
}

impl ThreadPool {
    /// Run a function in the thread pool.
    ///
    /// This corresponds to [`rayon::ThreadPool::install`]. Parallel iterators
    /// used inside `op` run on this pool's threads.
    pub fn run<R: Send, Op: FnOnce() -> R + Send>(&self, op: Op) -> R {
        if let Some(pool) = self.pool.as_ref() {
            pool.install(op)
        } else {
            op()
        }
    }

    /// Create a thread pool with a given number of threads.
    pub fn with_num_threads(num_threads: usize) -> ThreadPool {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("sprite-{}", index))
            .build();

        if let Err(err) = &pool {
            log::warn!("failed to create thread pool: {}", err);
        }

        ThreadPool { pool: pool.ok() }
    }

    /// Return the number of threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map(|pool| pool.current_num_threads())
            .unwrap_or(1)
    }
}

/// Return the number of threads used by the default pool.
///
/// This is the logical core count, unless overridden by the
/// `SPRITE_NUM_THREADS` environment variable, whose value is clamped to
/// between 1 and the logical core count.
fn default_thread_count() -> usize {
    let logical_cpus = num_cpus::get().max(1);
    match env_value::<usize>(NUM_THREADS_ENV_VAR) {
        Some(n_threads) => n_threads.clamp(1, logical_cpus),
        None => logical_cpus,
    }
}

/// Return the [Rayon][rayon] thread pool which is used when an analysis is
/// not given a pool explicitly.
///
/// To run your own tasks in this thread pool, you can use
/// [`ThreadPool::run`].
///
/// [rayon]: https://github.com/rayon-rs/rayon
pub fn thread_pool() -> &'static ThreadPool {
    static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();
    THREAD_POOL.get_or_init(|| ThreadPool::with_num_threads(default_thread_count()))
}
