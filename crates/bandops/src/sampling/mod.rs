//! Weighted downsampling without replacement.
//!
//! [`SampleTree`] is the tournament tree enabling O(log n) weighted
//! draws; the `downsample_*` kernels apply it per slice, dense row, or
//! compressed band.

mod downsample;
mod tree;

pub use downsample::{downsample_compressed, downsample_into, downsample_matrix};
pub use tree::SampleTree;
