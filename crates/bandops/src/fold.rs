//! In-place fold-factor computation over count matrices.
//!
//! A fold factor compares an observed count against its expectation
//! under independence: `log2((observed + 1) / (expected + 1))` where
//! `expected = total * fraction`. Factors weaker than a threshold are
//! squashed to zero so downstream consumers see a sparse signal.

use num_traits::{Float, PrimInt};

use crate::data::{offset_index, CompressedViewMut, DenseViewMut, Element};
use crate::utils::Parallelism;

#[inline]
fn fold_value<D: Float>(observed: D, expected: D, min_fold: D) -> D {
    let fold = ((observed + D::one()) / (expected + D::one())).log2();
    if fold < min_fold {
        D::zero()
    } else {
        fold
    }
}

/// Replace every entry of a dense count matrix with its fold factor.
///
/// The expectation of entry `(row, column)` is
/// `total_of_rows[row] * fraction_of_columns[column]`.
pub fn fold_factor_dense<D: Float + Element>(
    parallelism: Parallelism,
    data: &mut DenseViewMut<'_, D>,
    min_fold: D,
    total_of_rows: &[D],
    fraction_of_columns: &[D],
) {
    assert_eq!(
        total_of_rows.len(),
        data.n_rows(),
        "fold_factor_dense: totals length {} does not match {} rows",
        total_of_rows.len(),
        data.n_rows()
    );
    assert_eq!(
        fraction_of_columns.len(),
        data.n_cols(),
        "fold_factor_dense: fractions length {} does not match {} columns",
        fraction_of_columns.len(),
        data.n_cols()
    );

    let rows = data.rows_mut().zip(total_of_rows.iter());
    parallelism.maybe_par_bridge_for_each(rows, |(row, &total)| {
        for (value, &fraction) in row.iter_mut().zip(fraction_of_columns) {
            *value = fold_value(*value, total * fraction, min_fold);
        }
    });
}

/// Replace every stored entry of a compressed count matrix with its
/// fold factor.
///
/// Bands play the role of dense rows: the expectation of a stored
/// entry in band `b` with column identifier `c` is
/// `total_of_bands[b] * fraction_of_elements[c]`. Matches
/// [`fold_factor_dense`] applied to the equivalent dense matrix,
/// except that absent entries stay absent.
pub fn fold_factor_compressed<D, I, P>(
    parallelism: Parallelism,
    matrix: &mut CompressedViewMut<'_, D, I, P>,
    min_fold: D,
    total_of_bands: &[D],
    fraction_of_elements: &[D],
) where
    D: Float + Element,
    I: PrimInt + Send + Sync,
    P: PrimInt + Send + Sync,
{
    assert_eq!(
        total_of_bands.len(),
        matrix.bands_count(),
        "fold_factor_compressed: totals length {} does not match {} bands",
        total_of_bands.len(),
        matrix.bands_count()
    );
    assert_eq!(
        fraction_of_elements.len(),
        matrix.elements_count(),
        "fold_factor_compressed: fractions length {} does not match {} elements",
        fraction_of_elements.len(),
        matrix.elements_count()
    );

    let bands = matrix.bands_mut().zip(total_of_bands.iter());
    parallelism.maybe_par_bridge_for_each(bands, |((indices, data), &total)| {
        for (value, &index) in data.iter_mut().zip(indices.iter()) {
            let fraction = fraction_of_elements[offset_index(index)];
            *value = fold_value(*value, total * fraction, min_fold);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dense_folds_against_expectation() {
        // One row with total 16; expected counts are 4 and 12.
        let mut data = [9.0f64, 12.0];
        let mut matrix = DenseViewMut::from_slice(&mut data, 1, 2, "counts");

        fold_factor_dense(
            Parallelism::Sequential,
            &mut matrix,
            0.5,
            &[16.0],
            &[0.25, 0.75],
        );

        assert_relative_eq!(data[0], (10.0f64 / 5.0).log2());
        // log2(13/13) = 0 < 0.5, squashed.
        assert_eq!(data[1], 0.0);
    }

    #[test]
    fn weak_folds_are_squashed_to_zero() {
        let mut data = [3.0f64, 30.0];
        let mut matrix = DenseViewMut::from_slice(&mut data, 1, 2, "counts");

        fold_factor_dense(
            Parallelism::Sequential,
            &mut matrix,
            2.0,
            &[8.0],
            &[0.5, 0.5],
        );

        // log2(4/5) is negative, log2(31/5) > 2.
        assert_eq!(data[0], 0.0);
        assert_relative_eq!(data[1], (31.0f64 / 5.0).log2());
    }

    #[test]
    fn compressed_matches_dense_on_stored_entries() {
        let totals = [16.0f64, 8.0];
        let fractions = [0.25f64, 0.75];

        // Dense 2 x 2 counts.
        let mut dense = [9.0f64, 12.0, 1.0, 5.0];
        let mut dense_view = DenseViewMut::from_slice(&mut dense, 2, 2, "counts");
        fold_factor_dense(
            Parallelism::Sequential,
            &mut dense_view,
            0.0,
            &totals,
            &fractions,
        );

        // Same counts with row 1's first entry absent; bands are rows.
        let mut data = [9.0f64, 12.0, 5.0];
        let mut indices = [0i32, 1, 1];
        let indptr = [0i32, 2, 3];
        let mut compressed = CompressedViewMut::new(&mut data, &mut indices, &indptr, 2, "counts");
        fold_factor_compressed(
            Parallelism::Sequential,
            &mut compressed,
            0.0,
            &totals,
            &fractions,
        );

        assert_relative_eq!(data[0], dense[0]);
        assert_relative_eq!(data[1], dense[1]);
        assert_relative_eq!(data[2], dense[3]);
    }

    #[test]
    fn negative_threshold_keeps_negative_folds() {
        let mut data = [1.0f64];
        let mut matrix = DenseViewMut::from_slice(&mut data, 1, 1, "counts");
        fold_factor_dense(
            Parallelism::Sequential,
            &mut matrix,
            -10.0,
            &[16.0],
            &[1.0],
        );
        assert_relative_eq!(data[0], (2.0f64 / 17.0).log2());
    }
}
