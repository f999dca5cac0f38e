//! Borrowed row-major dense matrix views.
//!
//! A view may cover a padded sub-matrix of a larger row-major buffer:
//! each row is contiguous (`n_cols` elements, unit stride) but
//! consecutive rows may be `row_stride >= n_cols` elements apart.
//! Row access is O(1) and returns plain slices; the `rows()` /
//! `rows_mut()` iterators are the seam the parallel dispatcher fans
//! out over.

use ndarray::ArrayView2;

/// Immutable borrowed row-major matrix view.
#[derive(Debug, Clone, Copy)]
pub struct DenseView<'a, T> {
    data: &'a [T],
    n_rows: usize,
    n_cols: usize,
    row_stride: usize,
    name: &'static str,
}

/// `data` must hold at least `(n_rows - 1) * row_stride + n_cols`
/// elements and at most `n_rows * row_stride` (the full padded buffer;
/// anything past each row's first `n_cols` elements is ignored).
fn check_shape(len: usize, n_rows: usize, n_cols: usize, row_stride: usize, name: &str) {
    assert!(n_rows > 0, "{name}: matrix must have at least one row");
    assert!(n_cols > 0, "{name}: matrix must have at least one column");
    assert!(
        n_cols <= row_stride,
        "{name}: columns {n_cols} exceed row stride {row_stride}"
    );
    let required = (n_rows - 1) * row_stride + n_cols;
    assert!(
        required <= len && len <= n_rows * row_stride,
        "{name}: buffer length {len} does not match {n_rows}x{n_cols} \
         with row stride {row_stride} (expected {required} to {})",
        n_rows * row_stride
    );
}

impl<'a, T> DenseView<'a, T> {
    /// Create a view over a packed row-major buffer.
    pub fn from_slice(data: &'a [T], n_rows: usize, n_cols: usize, name: &'static str) -> Self {
        Self::with_row_stride(data, n_rows, n_cols, n_cols, name)
    }

    /// Create a view over a padded row-major buffer.
    pub fn with_row_stride(
        data: &'a [T],
        n_rows: usize,
        n_cols: usize,
        row_stride: usize,
        name: &'static str,
    ) -> Self {
        check_shape(data.len(), n_rows, n_cols, row_stride, name);
        Self {
            data,
            n_rows,
            n_cols,
            row_stride,
            name,
        }
    }

    /// Create a view from an `ndarray` array.
    ///
    /// The array must be in standard (row-major, contiguous) layout
    /// with both dimensions non-empty; padded sub-views of foreign
    /// buffers go through [`with_row_stride`](Self::with_row_stride).
    pub fn from_array(array: ArrayView2<'a, T>, name: &'static str) -> Self {
        let (n_rows, n_cols) = array.dim();
        let data = array
            .to_slice()
            .unwrap_or_else(|| panic!("{name}: array is not in standard row-major layout"));
        Self::from_slice(data, n_rows, n_cols, name)
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Diagnostic name used in panic messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get a row as a contiguous slice. O(1).
    #[inline]
    pub fn row(&self, row: usize) -> &'a [T] {
        assert!(
            row < self.n_rows,
            "{}: row index {row} out of bounds for {} rows",
            self.name,
            self.n_rows
        );
        let start = row * self.row_stride;
        &self.data[start..start + self.n_cols]
    }

    /// Iterate over rows as contiguous slices.
    #[inline]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [T]> + Send + Clone
    where
        T: Sync,
    {
        let n_cols = self.n_cols;
        self.data.chunks(self.row_stride).map(move |chunk| &chunk[..n_cols])
    }
}

/// Mutable borrowed row-major matrix view.
#[derive(Debug)]
pub struct DenseViewMut<'a, T> {
    data: &'a mut [T],
    n_rows: usize,
    n_cols: usize,
    row_stride: usize,
    name: &'static str,
}

impl<'a, T> DenseViewMut<'a, T> {
    /// Create a mutable view over a packed row-major buffer.
    pub fn from_slice(data: &'a mut [T], n_rows: usize, n_cols: usize, name: &'static str) -> Self {
        Self::with_row_stride(data, n_rows, n_cols, n_cols, name)
    }

    /// Create a mutable view over a padded row-major buffer.
    pub fn with_row_stride(
        data: &'a mut [T],
        n_rows: usize,
        n_cols: usize,
        row_stride: usize,
        name: &'static str,
    ) -> Self {
        check_shape(data.len(), n_rows, n_cols, row_stride, name);
        Self {
            data,
            n_rows,
            n_cols,
            row_stride,
            name,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Diagnostic name used in panic messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> DenseView<'_, T> {
        DenseView {
            data: self.data,
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_stride: self.row_stride,
            name: self.name,
        }
    }

    /// Get a row as a contiguous mutable slice. O(1).
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(
            row < self.n_rows,
            "{}: row index {row} out of bounds for {} rows",
            self.name,
            self.n_rows
        );
        let start = row * self.row_stride;
        &mut self.data[start..start + self.n_cols]
    }

    /// Iterate over rows as disjoint contiguous mutable slices.
    ///
    /// This is the fan-out seam: the yielded slices never alias, so the
    /// iterator can be bridged across worker threads.
    #[inline]
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [T]> + Send + '_
    where
        T: Send,
    {
        let n_cols = self.n_cols;
        self.data
            .chunks_mut(self.row_stride)
            .map(move |chunk| &mut chunk[..n_cols])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn packed_rows() {
        let data = [1, 2, 3, 4, 5, 6];
        let view = DenseView::from_slice(&data, 2, 3, "m");
        assert_eq!(view.n_rows(), 2);
        assert_eq!(view.n_cols(), 3);
        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
    }

    #[test]
    fn padded_rows() {
        // 2x2 sub-view of a 4-wide buffer: rows at offsets 0 and 4.
        let data = [1, 2, 9, 9, 3, 4];
        let view = DenseView::with_row_stride(&data, 2, 2, 4, "m");
        assert_eq!(view.row(0), &[1, 2]);
        assert_eq!(view.row(1), &[3, 4]);

        let rows: Vec<_> = view.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
    }

    #[test]
    fn fully_padded_buffer() {
        // 2x2 sub-view of a full 2x4 buffer, trailing pad included.
        let data = [1, 2, 9, 9, 3, 4, 9, 9];
        let view = DenseView::with_row_stride(&data, 2, 2, 4, "m");
        assert_eq!(view.row(0), &[1, 2]);
        assert_eq!(view.row(1), &[3, 4]);

        let rows: Vec<_> = view.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn oversized_buffer_panics() {
        let data = [0; 9];
        DenseView::with_row_stride(&data, 2, 2, 4, "m");
    }

    #[test]
    fn rows_mut_are_disjoint() {
        let mut data = [0; 6];
        let mut view = DenseViewMut::from_slice(&mut data, 2, 3, "m");
        for (i, row) in view.rows_mut().enumerate() {
            for value in row {
                *value = i + 1;
            }
        }
        assert_eq!(data, [1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn from_ndarray() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let view = DenseView::from_array(a.view(), "m");
        assert_eq!(view.row(1), &[3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn wrong_length_panics() {
        let data = [1, 2, 3];
        DenseView::from_slice(&data, 2, 2, "m");
    }

    #[test]
    #[should_panic(expected = "row index")]
    fn row_out_of_bounds_panics() {
        let data = [1, 2];
        let view = DenseView::from_slice(&data, 1, 2, "m");
        view.row(1);
    }

    #[test]
    #[should_panic(expected = "standard row-major layout")]
    fn non_contiguous_ndarray_panics() {
        let a = array![[1, 2], [3, 4]];
        let t = a.t();
        DenseView::from_array(t, "m");
    }
}
