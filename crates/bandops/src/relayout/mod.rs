//! Changing the layout of compressed matrices: scatter into a
//! transposed layout, per-band index sorting, and seeded shuffles.

mod collect;
mod sort;

pub use collect::collect_compressed;
pub use sort::{shuffle_compressed, shuffle_matrix, sort_compressed};
