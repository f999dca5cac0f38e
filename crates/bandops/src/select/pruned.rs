//! Pruning a candidate edge set down to a bounded per-band degree.

use crate::data::{band_slices_mut, CompressedView};
use crate::utils::Parallelism;

use super::total_cmp;

/// Keep at most `pruned_degree` edges per band, preferring higher
/// ranks.
///
/// `input` is a compressed edge set: band `b` holds the candidate
/// neighbor identifiers (`indices`, ascending) with their ranks
/// (`data`). The pruned edges of band `b` land in
/// `output_indices`/`output_ranks` at the offsets written to
/// `output_indptr`, still in ascending identifier order. The output
/// arrays may be larger than the pruned total; the tail is left
/// untouched.
pub fn collect_pruned(
    parallelism: Parallelism,
    pruned_degree: usize,
    input: &CompressedView<'_, f32, i32, i32>,
    output_indices: &mut [i32],
    output_ranks: &mut [f32],
    output_indptr: &mut [i32],
) {
    assert!(
        pruned_degree > 0,
        "collect_pruned: pruned degree must be positive"
    );
    assert_eq!(
        output_indptr.len(),
        input.bands_count() + 1,
        "collect_pruned: output indptr length {} does not match {} bands",
        output_indptr.len(),
        input.bands_count()
    );
    assert_eq!(
        output_indices.len(),
        output_ranks.len(),
        "collect_pruned: output indices length {} does not match output ranks length {}",
        output_indices.len(),
        output_ranks.len()
    );

    output_indptr[0] = 0;
    for band in 0..input.bands_count() {
        let kept = input.band_range(band).len().min(pruned_degree);
        output_indptr[band + 1] = output_indptr[band] + kept as i32;
    }
    let total = output_indptr[input.bands_count()] as usize;
    assert!(
        total <= output_indices.len(),
        "collect_pruned: pruned total {total} exceeds output length {}",
        output_indices.len()
    );

    let bands = band_slices_mut(output_indices, output_indptr)
        .zip(band_slices_mut(output_ranks, output_indptr))
        .enumerate();
    parallelism.maybe_par_bridge_for_each_init(
        bands,
        Vec::new,
        |positions: &mut Vec<usize>, (band, (band_indices, band_ranks))| {
            let indices = input.band_indices(band);
            let ranks = input.band_data(band);

            if indices.len() <= pruned_degree {
                band_indices.copy_from_slice(indices);
                band_ranks.copy_from_slice(ranks);
                return;
            }

            positions.clear();
            positions.extend(0..indices.len());
            positions.select_nth_unstable_by(pruned_degree, |&left, &right| {
                total_cmp(&ranks[right], &ranks[left])
            });
            positions.truncate(pruned_degree);
            positions.sort_unstable();

            for ((index, rank), &position) in band_indices
                .iter_mut()
                .zip(band_ranks.iter_mut())
                .zip(positions.iter())
            {
                *index = indices[position];
                *rank = ranks[position];
            }
        },
    );
}
