//! Extracting a per-row order statistic from a dense matrix.

use crate::data::{DenseView, Element};
use crate::utils::Parallelism;

use super::total_cmp;

/// Write the `rank`-th smallest value of every row (0-based, so rank 0
/// is the minimum and rank `n_cols - 1` the maximum) into `output`.
pub fn rank_matrix<D: Element + PartialOrd>(
    parallelism: Parallelism,
    input: &DenseView<'_, D>,
    output: &mut [D],
    rank: usize,
) {
    assert_eq!(
        output.len(),
        input.n_rows(),
        "rank_matrix: output length {} does not match {} rows",
        output.len(),
        input.n_rows()
    );
    assert!(
        rank < input.n_cols(),
        "rank_matrix: rank {rank} out of bounds for {} columns",
        input.n_cols()
    );

    let rows = input.rows().zip(output.iter_mut());
    parallelism.maybe_par_bridge_for_each_init(
        rows,
        Vec::new,
        |positions: &mut Vec<usize>, (row, out)| {
            positions.clear();
            positions.extend(0..row.len());
            positions.select_nth_unstable_by(rank, |&left, &right| {
                total_cmp(&row[left], &row[right])
            });
            *out = row[positions[rank]];
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_order_statistics() {
        #[rustfmt::skip]
        let data = [
            3.0f32, 1.0, 2.0,
            9.0, 7.0, 8.0,
        ];
        let input = DenseView::from_slice(&data, 2, 3, "counts");
        let mut output = [0.0f32; 2];

        rank_matrix(Parallelism::Sequential, &input, &mut output, 0);
        assert_eq!(output, [1.0, 7.0]);

        rank_matrix(Parallelism::Sequential, &input, &mut output, 1);
        assert_eq!(output, [2.0, 8.0]);

        rank_matrix(Parallelism::Sequential, &input, &mut output, 2);
        assert_eq!(output, [3.0, 9.0]);
    }

    #[test]
    fn ties_are_harmless() {
        let data = [5i64, 5, 5, 1];
        let input = DenseView::from_slice(&data, 1, 4, "counts");
        let mut output = [0i64];
        rank_matrix(Parallelism::Sequential, &input, &mut output, 2);
        assert_eq!(output, [5]);
    }

    #[test]
    #[should_panic(expected = "rank 3 out of bounds")]
    fn rank_must_be_within_row() {
        let data = [0.0f32; 3];
        let input = DenseView::from_slice(&data, 1, 3, "counts");
        let mut output = [0.0f32];
        rank_matrix(Parallelism::Sequential, &input, &mut output, 3);
    }
}
