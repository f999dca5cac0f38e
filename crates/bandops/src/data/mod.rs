//! Borrowed view types over caller-owned buffers.
//!
//! All kernels in this crate operate on non-owning views: a view is
//! constructed from a buffer at the start of a call, validated once,
//! and discarded at return. 1-D arguments are plain slices; 2-D dense
//! arguments are [`DenseView`] / [`DenseViewMut`] (row-major with
//! optional row padding); compressed sparse arguments are
//! [`CompressedView`] / [`CompressedViewMut`] (CSR-style triplet of
//! data, indices, and indptr arrays).
//!
//! Construction validates shapes eagerly (`assert!` with the view's
//! diagnostic name); per-element bounds checks beyond what slice
//! indexing already provides are debug-only.

mod compressed;
mod dense;

pub use compressed::{
    band_slices_mut, BandSlicesMut, BandsMut, CompressedView, CompressedViewMut,
};
pub use dense::{DenseView, DenseViewMut};

use num_traits::PrimInt;

/// Numeric element stored in a dense or compressed matrix.
///
/// Blanket-implemented; exists to keep kernel signatures readable.
pub trait Element: Copy + Send + Sync + 'static {}
impl<T: Copy + Send + Sync + 'static> Element for T {}

/// Convert a stored index or offset to a `usize` position.
///
/// Negative or non-representable values violate the compressed-matrix
/// contract and panic.
#[inline]
pub(crate) fn offset_index<P: PrimInt>(offset: P) -> usize {
    offset.to_usize().expect("offset does not fit in usize")
}

/// Convert a `usize` position back to a stored index or offset type.
#[inline]
pub(crate) fn index_offset<P: PrimInt>(index: usize) -> P {
    P::from(index).expect("index does not fit in offset type")
}
