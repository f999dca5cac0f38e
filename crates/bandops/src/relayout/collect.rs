//! Scatter a compressed matrix into a transposed compressed layout.

use std::sync::atomic::{AtomicUsize, Ordering};

use num_traits::PrimInt;

use crate::data::{index_offset, offset_index, CompressedView, Element};
use crate::utils::Parallelism;

/// Raw output buffers shared across scatter workers.
///
/// Safety rests on the cursor discipline: every `fetch_add` on a
/// band cursor yields a unique slot, so no two workers ever write the
/// same position.
struct ScatterTarget<D, I> {
    data: *mut D,
    indices: *mut I,
    len: usize,
}

unsafe impl<D: Send, I: Send> Send for ScatterTarget<D, I> {}
unsafe impl<D: Send, I: Send> Sync for ScatterTarget<D, I> {}

impl<D, I> ScatterTarget<D, I> {
    #[inline]
    unsafe fn write(&self, slot: usize, index: I, value: D) {
        debug_assert!(slot < self.len);
        *self.indices.add(slot) = index;
        *self.data.add(slot) = value;
    }
}

/// Scatter `input`'s elements into a transposed compressed layout.
///
/// `output_indptr` must hold the standard band-boundary offsets of the
/// transposed matrix (one band per distinct column identifier of
/// `input`, plus a final total). Its first `elements_count` entries are
/// consumed as write cursors: on return, entry `b` has advanced to the
/// end of band `b`, so band `b` then spans
/// `output_indptr[b - 1]..output_indptr[b]` (band 0 starts at 0).
///
/// Each scattered element records its source band in `output_indices`.
/// Under [`Parallelism::Parallel`] the order of elements within an
/// output band depends on scheduling; follow with
/// [`sort_compressed`](super::sort_compressed) to canonicalize.
pub fn collect_compressed<D, I, P>(
    parallelism: Parallelism,
    input: &CompressedView<'_, D, I, P>,
    output_data: &mut [D],
    output_indices: &mut [I],
    output_indptr: &mut [P],
) where
    D: Element,
    I: PrimInt + Send + Sync,
    P: PrimInt + Send + Sync,
{
    let total = input.indices().len();
    assert_eq!(
        output_data.len(),
        total,
        "collect_compressed: output data length {} does not match input element count {total}",
        output_data.len()
    );
    assert_eq!(
        output_indices.len(),
        total,
        "collect_compressed: output indices length {} does not match input element count {total}",
        output_indices.len()
    );
    assert_eq!(
        output_indptr.len(),
        input.elements_count() + 1,
        "collect_compressed: output indptr length {} does not match {} output bands",
        output_indptr.len(),
        input.elements_count()
    );
    assert_eq!(
        offset_index(output_indptr[output_indptr.len() - 1]),
        total,
        "collect_compressed: output indptr end does not match input element count {total}"
    );

    if parallelism.is_parallel() {
        let cursors: Vec<AtomicUsize> = output_indptr[..input.elements_count()]
            .iter()
            .map(|&offset| AtomicUsize::new(offset_index(offset)))
            .collect();
        let target = ScatterTarget {
            data: output_data.as_mut_ptr(),
            indices: output_indices.as_mut_ptr(),
            len: total,
        };

        parallelism.maybe_par_for_each(0..input.bands_count(), |band| {
            let band_index = index_offset::<I>(band);
            for (&column, &value) in input.band_indices(band).iter().zip(input.band_data(band)) {
                let slot = cursors[offset_index(column)].fetch_add(1, Ordering::Relaxed);
                // Unique slot per fetch_add; see ScatterTarget.
                unsafe { target.write(slot, band_index, value) };
            }
        });

        for (offset, cursor) in output_indptr.iter_mut().zip(cursors) {
            *offset = index_offset(cursor.into_inner());
        }
    } else {
        for band in 0..input.bands_count() {
            let band_index = index_offset::<I>(band);
            for (&column, &value) in input.band_indices(band).iter().zip(input.band_data(band)) {
                let cursor = &mut output_indptr[offset_index(column)];
                let slot = offset_index(*cursor);
                *cursor = *cursor + P::one();
                output_indices[slot] = band_index;
                output_data[slot] = value;
            }
        }
    }
}
