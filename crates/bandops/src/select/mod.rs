//! Per-band selection kernels: nearest-neighbor collection, degree
//! pruning, rank extraction, and top-distinct picking.

mod distinct;
mod outgoing;
mod pruned;
mod rank;

pub use distinct::top_distinct;
pub use outgoing::collect_outgoing;
pub use pruned::collect_pruned;
pub use rank::rank_matrix;

use std::cmp::Ordering;

/// Total order over partially-ordered values; incomparable pairs
/// (NaNs) compare equal, matching a "garbage in, garbage out" contract.
#[inline]
pub(crate) fn total_cmp<T: PartialOrd>(left: &T, right: &T) -> Ordering {
    left.partial_cmp(right).unwrap_or(Ordering::Equal)
}
