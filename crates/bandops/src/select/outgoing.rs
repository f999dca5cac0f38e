//! Collecting the most-similar outgoing edges of every element.

use crate::data::DenseView;
use crate::utils::Parallelism;

use super::total_cmp;

/// For every row of a square `similarity` matrix, select the `degree`
/// most-similar other elements (the diagonal is never a candidate).
///
/// `output_indices` and `output_ranks` are row-major `size x degree`
/// buffers. Each output row holds the selected element identifiers in
/// ascending order; the parallel rank entry is `1.0` for the
/// least-similar selected neighbor up to `degree as f32` for the
/// most-similar.
pub fn collect_outgoing(
    parallelism: Parallelism,
    degree: usize,
    similarity: &DenseView<'_, f32>,
    output_indices: &mut [i32],
    output_ranks: &mut [f32],
) {
    let size = similarity.n_rows();
    assert_eq!(
        size,
        similarity.n_cols(),
        "collect_outgoing: similarity matrix is {size} x {} rather than square",
        similarity.n_cols()
    );
    assert!(
        degree > 0 && degree < size,
        "collect_outgoing: degree {degree} is not in 1..{size}"
    );
    assert_eq!(
        output_indices.len(),
        size * degree,
        "collect_outgoing: output indices length {} does not match {size} x {degree}",
        output_indices.len()
    );
    assert_eq!(
        output_ranks.len(),
        size * degree,
        "collect_outgoing: output ranks length {} does not match {size} x {degree}",
        output_ranks.len()
    );

    let rows = similarity
        .rows()
        .zip(output_indices.chunks_mut(degree))
        .zip(output_ranks.chunks_mut(degree))
        .enumerate();
    parallelism.maybe_par_bridge_for_each_init(
        rows,
        Vec::new,
        |positions: &mut Vec<usize>, (row_index, ((row, row_indices), row_ranks))| {
            positions.clear();
            positions.extend((0..row_index).chain(row_index + 1..size));
            if degree < size - 1 {
                positions.select_nth_unstable_by(degree, |&left, &right| {
                    total_cmp(&row[right], &row[left])
                });
                positions.truncate(degree);
            }
            positions.sort_unstable();
            for (index, &position) in row_indices.iter_mut().zip(positions.iter()) {
                *index = position as i32;
            }

            // Rank selected neighbors by ascending similarity.
            positions.clear();
            positions.extend(0..degree);
            positions.sort_unstable_by(|&left, &right| {
                total_cmp(
                    &row[row_indices[left] as usize],
                    &row[row_indices[right] as usize],
                )
            });
            for (location, &position) in positions.iter().enumerate() {
                row_ranks[position] = (location + 1) as f32;
            }
        },
    );
}
