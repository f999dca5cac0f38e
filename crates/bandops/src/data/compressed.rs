//! Borrowed CSR-style compressed matrix views.
//!
//! A compressed matrix is three parallel arrays: `data` (stored
//! values), `indices` (the column identifier of each value), and
//! `indptr` (band boundaries, length `bands + 1`). Band `b` owns the
//! half-open slice `indptr[b]..indptr[b + 1]` of `data` and `indices`.
//! Indices within a band are distinct but not inherently sorted;
//! sortedness is a property some kernels require and
//! [`sort_compressed`](crate::relayout::sort_compressed) restores.

use num_traits::PrimInt;

use super::{offset_index, Element};

fn check_structure<D, I, P: PrimInt>(
    data: &[D],
    indices: &[I],
    indptr: &[P],
    name: &str,
) -> usize {
    assert!(
        indptr.len() > 1,
        "{name}: indptr must have at least two entries"
    );
    let total = offset_index(indptr[indptr.len() - 1]);
    assert_eq!(
        total,
        indices.len(),
        "{name}: indptr end {total} does not match indices length {}",
        indices.len()
    );
    assert_eq!(
        total,
        data.len(),
        "{name}: indptr end {total} does not match data length {}",
        data.len()
    );
    #[cfg(debug_assertions)]
    for window in indptr.windows(2) {
        debug_assert!(
            window[0] <= window[1],
            "{name}: indptr is not monotonically non-decreasing"
        );
    }
    indptr.len() - 1
}

/// Immutable compressed (CSR) matrix view.
///
/// `D` is the stored value type, `I` the column-index type, `P` the
/// offset type of `indptr`.
#[derive(Debug, Clone, Copy)]
pub struct CompressedView<'a, D, I, P> {
    data: &'a [D],
    indices: &'a [I],
    indptr: &'a [P],
    bands_count: usize,
    elements_count: usize,
    name: &'static str,
}

impl<'a, D: Element, I: PrimInt, P: PrimInt> CompressedView<'a, D, I, P> {
    /// Create a view; `elements_count` is the number of distinct column
    /// identifiers (the width of the uncompressed matrix).
    pub fn new(
        data: &'a [D],
        indices: &'a [I],
        indptr: &'a [P],
        elements_count: usize,
        name: &'static str,
    ) -> Self {
        let bands_count = check_structure(data, indices, indptr, name);
        Self {
            data,
            indices,
            indptr,
            bands_count,
            elements_count,
            name,
        }
    }

    /// Number of bands (rows in CSR orientation).
    #[inline]
    pub fn bands_count(&self) -> usize {
        self.bands_count
    }

    /// Number of distinct column identifiers.
    #[inline]
    pub fn elements_count(&self) -> usize {
        self.elements_count
    }

    /// Diagnostic name used in panic messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The full stored-values array.
    #[inline]
    pub fn data(&self) -> &'a [D] {
        self.data
    }

    /// The full column-indices array.
    #[inline]
    pub fn indices(&self) -> &'a [I] {
        self.indices
    }

    /// The band-boundary offsets array.
    #[inline]
    pub fn indptr(&self) -> &'a [P] {
        self.indptr
    }

    /// The positions of band `band` inside `data`/`indices`. O(1).
    #[inline]
    pub fn band_range(&self, band: usize) -> std::ops::Range<usize> {
        assert!(
            band < self.bands_count,
            "{}: band index {band} out of bounds for {} bands",
            self.name,
            self.bands_count
        );
        let start = offset_index(self.indptr[band]);
        let stop = offset_index(self.indptr[band + 1]);
        debug_assert!(start <= stop);
        start..stop
    }

    /// Column indices of band `band`. O(1).
    #[inline]
    pub fn band_indices(&self, band: usize) -> &'a [I] {
        &self.indices[self.band_range(band)]
    }

    /// Stored values of band `band`. O(1).
    #[inline]
    pub fn band_data(&self, band: usize) -> &'a [D] {
        &self.data[self.band_range(band)]
    }
}

/// Mutable compressed (CSR) matrix view.
#[derive(Debug)]
pub struct CompressedViewMut<'a, D, I, P> {
    data: &'a mut [D],
    indices: &'a mut [I],
    indptr: &'a [P],
    bands_count: usize,
    elements_count: usize,
    name: &'static str,
}

impl<'a, D: Element, I: PrimInt, P: PrimInt> CompressedViewMut<'a, D, I, P> {
    /// Create a mutable view over caller-owned `data` and `indices`.
    pub fn new(
        data: &'a mut [D],
        indices: &'a mut [I],
        indptr: &'a [P],
        elements_count: usize,
        name: &'static str,
    ) -> Self {
        let bands_count = check_structure(data, indices, indptr, name);
        Self {
            data,
            indices,
            indptr,
            bands_count,
            elements_count,
            name,
        }
    }

    /// Number of bands.
    #[inline]
    pub fn bands_count(&self) -> usize {
        self.bands_count
    }

    /// Number of distinct column identifiers.
    #[inline]
    pub fn elements_count(&self) -> usize {
        self.elements_count
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> CompressedView<'_, D, I, P> {
        CompressedView {
            data: self.data,
            indices: self.indices,
            indptr: self.indptr,
            bands_count: self.bands_count,
            elements_count: self.elements_count,
            name: self.name,
        }
    }

    /// Mutable `(indices, data)` slices of band `band`. O(1).
    #[inline]
    pub fn band_mut(&mut self, band: usize) -> (&mut [I], &mut [D]) {
        let range = self.as_view().band_range(band);
        (
            &mut self.indices[range.clone()],
            &mut self.data[range],
        )
    }

    /// Iterate over bands as disjoint mutable `(indices, data)` slice
    /// pairs.
    ///
    /// The fan-out seam for band-parallel kernels: the yielded slices
    /// never alias, so the iterator can be bridged across workers.
    pub fn bands_mut(&mut self) -> BandsMut<'_, D, I, P> {
        // Honor a non-zero leading offset: the prefix belongs to no
        // band and is never yielded.
        let start = offset_index(self.indptr[0]);
        BandsMut {
            data: &mut self.data[start..],
            indices: &mut self.indices[start..],
            indptr: self.indptr,
            band: 0,
            taken: start,
        }
    }
}

/// Iterator over disjoint mutable band slices of a compressed matrix.
#[derive(Debug)]
pub struct BandsMut<'a, D, I, P> {
    data: &'a mut [D],
    indices: &'a mut [I],
    indptr: &'a [P],
    band: usize,
    taken: usize,
}

impl<'a, D, I, P: PrimInt> Iterator for BandsMut<'a, D, I, P> {
    type Item = (&'a mut [I], &'a mut [D]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.band + 1 >= self.indptr.len() {
            return None;
        }
        let stop = offset_index(self.indptr[self.band + 1]);
        let len = stop - self.taken;

        let indices = std::mem::take(&mut self.indices);
        let (band_indices, rest) = indices.split_at_mut(len);
        self.indices = rest;

        let data = std::mem::take(&mut self.data);
        let (band_data, rest) = data.split_at_mut(len);
        self.data = rest;

        self.band += 1;
        self.taken = stop;
        Some((band_indices, band_data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indptr.len() - 1 - self.band;
        (remaining, Some(remaining))
    }
}

impl<D, I, P: PrimInt> ExactSizeIterator for BandsMut<'_, D, I, P> {}

/// Iterate over disjoint mutable band slices of a single values array,
/// delimited by `indptr`.
///
/// Used where only one of the parallel arrays is written (for example a
/// per-element output parallel to a compressed matrix's `data`). Any
/// prefix of `values` before `indptr[0]` and any tail beyond the last
/// offset are never yielded.
pub fn band_slices_mut<'a, T, P: PrimInt>(
    values: &'a mut [T],
    indptr: &'a [P],
) -> BandSlicesMut<'a, T, P> {
    assert!(
        indptr.len() > 1,
        "band_slices_mut: indptr must have at least two entries"
    );
    debug_assert!(offset_index(indptr[indptr.len() - 1]) <= values.len());
    let start = offset_index(indptr[0]);
    BandSlicesMut {
        values: &mut values[start..],
        indptr,
        band: 0,
        taken: start,
    }
}

/// See [`band_slices_mut`].
#[derive(Debug)]
pub struct BandSlicesMut<'a, T, P> {
    values: &'a mut [T],
    indptr: &'a [P],
    band: usize,
    taken: usize,
}

impl<'a, T, P: PrimInt> Iterator for BandSlicesMut<'a, T, P> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.band + 1 >= self.indptr.len() {
            return None;
        }
        let stop = offset_index(self.indptr[self.band + 1]);
        let len = stop - self.taken;

        let values = std::mem::take(&mut self.values);
        let (band, rest) = values.split_at_mut(len);
        self.values = rest;

        self.band += 1;
        self.taken = stop;
        Some(band)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indptr.len() - 1 - self.band;
        (remaining, Some(remaining))
    }
}

impl<T, P: PrimInt> ExactSizeIterator for BandSlicesMut<'_, T, P> {}

#[cfg(test)]
mod tests {
    use super::*;

    // Two bands over three columns:
    //   band 0: (col 2, 5.0)
    //   band 1: (col 0, 7.0), (col 2, 1.0)
    fn fixture() -> (Vec<f32>, Vec<i32>, Vec<i32>) {
        (vec![5.0, 7.0, 1.0], vec![2, 0, 2], vec![0, 1, 3])
    }

    #[test]
    fn band_slicing() {
        let (data, indices, indptr) = fixture();
        let view = CompressedView::new(&data, &indices, &indptr, 3, "m");

        assert_eq!(view.bands_count(), 2);
        assert_eq!(view.elements_count(), 3);
        assert_eq!(view.band_indices(0), &[2]);
        assert_eq!(view.band_data(0), &[5.0]);
        assert_eq!(view.band_indices(1), &[0, 2]);
        assert_eq!(view.band_data(1), &[7.0, 1.0]);
    }

    #[test]
    fn empty_band() {
        let data = [1.0f32];
        let indices = [0i32];
        let indptr = [0i32, 0, 1];
        let view = CompressedView::new(&data, &indices, &indptr, 2, "m");
        assert!(view.band_indices(0).is_empty());
        assert_eq!(view.band_indices(1), &[0]);
    }

    #[test]
    fn bands_mut_yields_disjoint_slices() {
        let (mut data, mut indices, indptr) = fixture();
        let mut view = CompressedViewMut::new(&mut data, &mut indices, &indptr, 3, "m");

        let bands: Vec<_> = view.bands_mut().collect();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].0, &[2]);
        assert_eq!(bands[1].1, &[7.0, 1.0]);
    }

    #[test]
    fn band_iterators_honor_leading_offset() {
        // indptr starts at 1: position 0 belongs to no band.
        let mut data = [2.0f32, 1.0];
        let mut indices = [5i32, 1];
        let indptr = [1i32, 2];
        let mut view = CompressedViewMut::new(&mut data, &mut indices, &indptr, 6, "m");

        let bands: Vec<_> = view.bands_mut().collect();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].0, &[1]);
        assert_eq!(bands[0].1, &[1.0]);

        let mut values = [10, 20];
        let slices: Vec<_> = band_slices_mut(&mut values, &indptr).collect();
        assert_eq!(slices, vec![&mut [20][..]]);
    }

    #[test]
    fn band_mut_writes_through() {
        let (mut data, mut indices, indptr) = fixture();
        let mut view = CompressedViewMut::new(&mut data, &mut indices, &indptr, 3, "m");

        let (band_indices, band_data) = view.band_mut(1);
        band_indices[0] = 1;
        band_data[0] = 8.0;

        assert_eq!(indices, [2, 1, 2]);
        assert_eq!(data, [5.0, 8.0, 1.0]);
    }

    #[test]
    fn band_slices_mut_respects_indptr() {
        let mut values = [10, 20, 30];
        let indptr = [0i64, 1, 3];
        let bands: Vec<_> = band_slices_mut(&mut values, &indptr).collect();
        assert_eq!(bands, vec![&mut [10][..], &mut [20, 30][..]]);
    }

    #[test]
    #[should_panic(expected = "does not match data length")]
    fn mismatched_data_length_panics() {
        let data = [1.0f32, 2.0];
        let indices = [0i32];
        let indptr = [0i32, 1];
        CompressedView::new(&data, &indices, &indptr, 1, "m");
    }
}
