//! Canonicalizing and shuffling compressed bands in place.

use num_traits::PrimInt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::{index_offset, CompressedViewMut, DenseViewMut, Element};
use crate::utils::{band_seed, Parallelism};

/// Reusable per-worker buffers for [`sort_compressed`].
#[derive(Debug, Default)]
pub struct SortScratch<I, D> {
    positions: Vec<usize>,
    indices: Vec<I>,
    data: Vec<D>,
}

impl<I, D> SortScratch<I, D> {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            data: Vec::new(),
        }
    }
}

/// Sort one band's parallel `(indices, data)` slices by ascending index.
fn sort_band<I, D>(indices: &mut [I], data: &mut [D], scratch: &mut SortScratch<I, D>)
where
    I: PrimInt,
    D: Element,
{
    debug_assert_eq!(indices.len(), data.len());
    if indices.is_empty() {
        return;
    }

    scratch.positions.clear();
    scratch.positions.extend(0..indices.len());
    scratch.positions.sort_unstable_by_key(|&p| indices[p]);

    scratch.indices.clear();
    scratch.data.clear();
    for &p in &scratch.positions {
        scratch.indices.push(indices[p]);
        scratch.data.push(data[p]);
    }
    indices.copy_from_slice(&scratch.indices);
    data.copy_from_slice(&scratch.data);
}

/// Sort every band of `matrix` by ascending column index, keeping each
/// `(index, value)` pair intact.
///
/// Distinct indices within a band are a construction invariant, so the
/// sorted order is unique and the unstable sort is deterministic.
pub fn sort_compressed<D, I, P>(parallelism: Parallelism, matrix: &mut CompressedViewMut<'_, D, I, P>)
where
    D: Element,
    I: PrimInt + Send + Sync,
    P: PrimInt + Send + Sync,
{
    parallelism.maybe_par_bridge_for_each_init(
        matrix.bands_mut(),
        SortScratch::new,
        |scratch, (indices, data)| {
            sort_band(indices, data, scratch);
        },
    );
}

/// Randomly permute the column assignment of every band's values, then
/// restore sorted indices.
///
/// Each band keeps its own multiset of values but they land on a fresh
/// random subset-free permutation of `0..elements_count`; band `b` uses
/// the stream seeded by [`band_seed`]`(seed, b)`.
pub fn shuffle_compressed<D, I, P>(
    parallelism: Parallelism,
    matrix: &mut CompressedViewMut<'_, D, I, P>,
    seed: u64,
) where
    D: Element,
    I: PrimInt + Send + Sync,
    P: PrimInt + Send + Sync,
{
    let elements_count = matrix.elements_count();
    parallelism.maybe_par_bridge_for_each_init(
        matrix.bands_mut().enumerate(),
        || (Vec::new(), SortScratch::new()),
        |(permutation, scratch): &mut (Vec<usize>, SortScratch<I, D>),
         (band, (indices, data))| {
            let mut rng = StdRng::seed_from_u64(band_seed(seed, band));

            permutation.clear();
            permutation.extend(0..elements_count);
            permutation.shuffle(&mut rng);

            for (index, &element) in indices.iter_mut().zip(permutation.iter()) {
                *index = index_offset(element);
            }
            sort_band(indices, data, scratch);
        },
    );
}

/// Shuffle every row of a dense matrix in place, independently.
///
/// Row `i` uses the stream seeded by [`band_seed`]`(seed, i)`.
pub fn shuffle_matrix<D: Element>(
    parallelism: Parallelism,
    matrix: &mut DenseViewMut<'_, D>,
    seed: u64,
) {
    parallelism.maybe_par_bridge_for_each(matrix.rows_mut().enumerate(), |(row_index, row)| {
        let mut rng = StdRng::seed_from_u64(band_seed(seed, row_index));
        row.shuffle(&mut rng);
    });
}
