//! Picking each row's most distinct values.

use crate::data::{DenseView, DenseViewMut};
use crate::utils::Parallelism;

use super::total_cmp;

/// For every row of `folds`, select the `distinct` most extreme values,
/// strongest first.
///
/// `distinct` is the width of the output matrices. With
/// `consider_low_folds`, strength is the absolute value, so strongly
/// negative entries compete with strongly positive ones; otherwise only
/// high values count. Each output row holds the winning column
/// identifiers and their (narrowed) fold values, ordered from strongest
/// to weakest.
pub fn top_distinct(
    parallelism: Parallelism,
    folds: &DenseView<'_, f64>,
    output_indices: &mut DenseViewMut<'_, i32>,
    output_folds: &mut DenseViewMut<'_, f32>,
    consider_low_folds: bool,
) {
    let distinct = output_indices.n_cols();
    assert!(
        distinct > 0 && distinct < folds.n_cols(),
        "top_distinct: distinct count {distinct} is not in 1..{}",
        folds.n_cols()
    );
    assert_eq!(
        output_indices.n_rows(),
        folds.n_rows(),
        "top_distinct: output indices have {} rows, folds have {}",
        output_indices.n_rows(),
        folds.n_rows()
    );
    assert_eq!(
        output_folds.n_rows(),
        folds.n_rows(),
        "top_distinct: output folds have {} rows, folds have {}",
        output_folds.n_rows(),
        folds.n_rows()
    );
    assert_eq!(
        output_folds.n_cols(),
        distinct,
        "top_distinct: output folds have {} columns, output indices have {distinct}",
        output_folds.n_cols()
    );

    let strength = move |value: f64| {
        if consider_low_folds {
            value.abs()
        } else {
            value
        }
    };

    let rows = folds
        .rows()
        .zip(output_indices.rows_mut())
        .zip(output_folds.rows_mut());
    parallelism.maybe_par_bridge_for_each_init(
        rows,
        Vec::new,
        move |positions: &mut Vec<usize>, ((row, row_indices), row_folds)| {
            positions.clear();
            positions.extend(0..row.len());
            let descending = |&left: &usize, &right: &usize| {
                total_cmp(&strength(row[right]), &strength(row[left]))
            };
            positions.select_nth_unstable_by(distinct, descending);
            positions.truncate(distinct);
            positions.sort_unstable_by(descending);

            for ((index, fold), &position) in row_indices
                .iter_mut()
                .zip(row_folds.iter_mut())
                .zip(positions.iter())
            {
                *index = position as i32;
                *fold = row[position] as f32;
            }
        },
    );
}
