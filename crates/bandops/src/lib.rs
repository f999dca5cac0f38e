//! bandops: parallel in-place kernels for dense and compressed matrices.
//!
//! Computational hot paths for band-oriented data analysis: weighted
//! downsampling without replacement, compressed-matrix relayout
//! (CSR ⇄ CSC scatter), in-band index sorting, per-row top-k selection,
//! rank statistics, and fold-factor normalization.
//!
//! # Key Types
//!
//! - [`DenseView`] / [`DenseViewMut`] - borrowed row-major matrix views
//! - [`CompressedView`] / [`CompressedViewMut`] - borrowed CSR views
//! - [`SampleTree`] - tournament tree for O(log n) weighted draws
//! - [`Parallelism`] - explicit sequential/parallel execution mode
//!
//! # Execution Model
//!
//! Every kernel is a pure function over caller-owned, pre-allocated
//! buffers: inputs are read, outputs are written in place, nothing is
//! allocated for the result and nothing outlives the call. Kernels fan
//! their row/band loop across rayon workers when handed
//! [`Parallelism::Parallel`], and run strictly sequentially under
//! [`Parallelism::Sequential`] (for callers that already parallelized
//! at a coarser grain). Per-band random seeding is a pure function of
//! the caller's seed and the band index, so results are bit-identical
//! regardless of how work is scheduled.
//!
//! # Contracts
//!
//! Shape and size preconditions are programmer contracts, not
//! recoverable errors: violations panic with a diagnostic. Expensive
//! per-element checks only run in debug builds.

pub mod data;
pub mod fold;
pub mod relayout;
pub mod sampling;
pub mod select;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// View types
pub use data::{CompressedView, CompressedViewMut, DenseView, DenseViewMut, Element};

// Downsampling
pub use sampling::{
    downsample_compressed, downsample_into, downsample_matrix, SampleTree,
};

// Relayout and band maintenance
pub use relayout::{collect_compressed, shuffle_compressed, shuffle_matrix, sort_compressed};

// Selection kernels
pub use select::{collect_outgoing, collect_pruned, rank_matrix, top_distinct};

// Fold-factor normalization
pub use fold::{fold_factor_compressed, fold_factor_dense};

// Execution mode
pub use utils::{band_seed, run_with_threads, Parallelism};
