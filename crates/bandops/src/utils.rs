//! Parallelism configuration and per-band seeding.
//!
//! Every kernel in this crate takes an explicit [`Parallelism`] value
//! instead of consulting global state; the embedding application decides
//! once (typically via [`run_with_threads`]) and threads the choice
//! through.

use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether a kernel may use its internal parallel fan-out.
///
/// When `Parallel`, kernels distribute their row/band loop across the
/// current rayon pool. When `Sequential`, they iterate in order on the
/// calling thread — the mode for embedders that already distributed
/// bands across coarser-grained workers and must not oversubscribe.
///
/// The flag is read once at kernel entry; outputs are bit-identical in
/// both modes because per-band seeding never depends on scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if the rayon pool has multiple threads)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    #[inline]
    pub fn maybe_par_for_each<T, I, F>(self, iter: I, f: F)
    where
        T: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().for_each(f);
        } else {
            iter.into_iter().for_each(f);
        }
    }

    /// Parallel bridge for_each for iterators that don't implement
    /// `IntoParallelIterator` (rows of a mutable view, band slices).
    #[inline]
    pub fn maybe_par_bridge_for_each<T, I, F>(self, iter: I, f: F)
    where
        T: Send,
        I: Iterator<Item = T> + Send,
        F: Fn(T) + Sync + Send,
    {
        if self.is_parallel() {
            iter.par_bridge().for_each(f);
        } else {
            iter.for_each(f);
        }
    }

    /// Parallel bridge for_each with per-thread scratch initialization.
    ///
    /// The `init` closure runs once per worker thread (parallel mode) or
    /// once total (sequential mode); the scratch is reused across units
    /// on the same thread as an allocation optimization only.
    #[inline]
    pub fn maybe_par_bridge_for_each_init<T, I, INIT, S, F>(self, iter: I, init: INIT, f: F)
    where
        T: Send,
        I: Iterator<Item = T> + Send,
        INIT: Fn() -> S + Sync + Send,
        F: Fn(&mut S, T) + Sync + Send,
    {
        if self.is_parallel() {
            iter.par_bridge().for_each_init(init, f);
        } else {
            let mut state = init();
            iter.for_each(|item| f(&mut state, item));
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use all available cores)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .expect("Failed to create thread pool");
            pool.install(|| f(Parallelism::Parallel))
        }
    }
}

// =============================================================================
// Per-Band Seeding
// =============================================================================

/// Derive the reproducible random seed for one row/band.
///
/// Seed 0 is the "non-reproducible default" sentinel and is propagated
/// unchanged to every band; any other seed is offset per band so each
/// gets an independent stream. The multiplier is an arbitrary
/// de-correlation constant kept for output compatibility.
#[inline]
pub fn band_seed(seed: u64, band_index: usize) -> u64 {
    if seed == 0 {
        0
    } else {
        seed.wrapping_add(band_index as u64 * 997)
    }
}
