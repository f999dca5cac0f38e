//! Total-preserving weighted downsampling of count vectors.

use num_traits::{Num, NumCast, ToPrimitive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::{band_slices_mut, offset_index, DenseView, DenseViewMut, Element};
use crate::utils::{band_seed, Parallelism};

use super::tree::SampleTree;

#[inline]
fn cast_count<O: NumCast>(count: usize) -> O {
    O::from(count).expect("count does not fit in output type")
}

/// Downsample one count slice into `output`, using `tree` as scratch.
fn downsample_with<D, O>(
    tree: &mut SampleTree,
    input: &[D],
    output: &mut [O],
    samples: usize,
    seed: u64,
) where
    D: Copy + ToPrimitive,
    O: Copy + Num + NumCast,
{
    assert_eq!(
        input.len(),
        output.len(),
        "downsample: input length {} does not match output length {}",
        input.len(),
        output.len()
    );

    if input.is_empty() {
        return;
    }

    if input.len() == 1 {
        let have = input[0]
            .to_usize()
            .expect("downsample weights must be non-negative integers");
        output[0] = cast_count(samples.min(have));
        return;
    }

    tree.rebuild(input);

    if tree.total() <= samples {
        // Nothing to reduce; the output sum equals the input sum.
        for (out, &value) in output.iter_mut().zip(input) {
            *out = NumCast::from(value).expect("value does not fit in output type");
        }
        return;
    }

    for out in output.iter_mut() {
        *out = O::zero();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..samples {
        let bucket = tree.draw(rng.gen_range(0..tree.total()));
        output[bucket] = output[bucket] + O::one();
    }
}

/// Downsample a count slice to (at most) `samples` total, without
/// replacement.
///
/// Guarantees `sum(output) == min(samples, sum(input))` and
/// `0 <= output[i] <= input[i]`; when the input total is already within
/// budget the input is copied through unchanged. Seeded draws are
/// deterministic per `seed`.
pub fn downsample_into<D, O>(input: &[D], output: &mut [O], samples: usize, seed: u64)
where
    D: Copy + ToPrimitive,
    O: Copy + Num + NumCast,
{
    let mut tree = SampleTree::new();
    downsample_with(&mut tree, input, output, samples, seed);
}

/// Downsample every row of a dense matrix independently.
///
/// Row `i` draws from the stream seeded by [`band_seed`]`(seed, i)`, so
/// results are reproducible and independent of scheduling.
pub fn downsample_matrix<D, O>(
    parallelism: Parallelism,
    input: &DenseView<'_, D>,
    output: &mut DenseViewMut<'_, O>,
    samples: usize,
    seed: u64,
) where
    D: Element + ToPrimitive,
    O: Element + Num + NumCast,
{
    assert_eq!(
        input.n_rows(),
        output.n_rows(),
        "downsample_matrix: input has {} rows, output has {}",
        input.n_rows(),
        output.n_rows()
    );
    assert_eq!(
        input.n_cols(),
        output.n_cols(),
        "downsample_matrix: input has {} columns, output has {}",
        input.n_cols(),
        output.n_cols()
    );

    let rows = input.rows().zip(output.rows_mut()).enumerate();
    parallelism.maybe_par_bridge_for_each_init(
        rows,
        SampleTree::new,
        |tree, (row_index, (row_input, row_output))| {
            downsample_with(tree, row_input, row_output, samples, band_seed(seed, row_index));
        },
    );
}

/// Downsample every band of a compressed matrix independently.
///
/// `output` is element-parallel to `data` (same length, same `indptr`
/// slicing); indices are irrelevant here and not taken.
pub fn downsample_compressed<D, O, P>(
    parallelism: Parallelism,
    data: &[D],
    indptr: &[P],
    output: &mut [O],
    samples: usize,
    seed: u64,
) where
    D: Element + ToPrimitive,
    O: Element + Num + NumCast,
    P: num_traits::PrimInt + Sync,
{
    assert!(
        indptr.len() > 1,
        "downsample_compressed: indptr must have at least two entries"
    );
    assert_eq!(
        offset_index::<P>(indptr[indptr.len() - 1]),
        data.len(),
        "downsample_compressed: indptr end does not match data length {}",
        data.len()
    );
    assert_eq!(
        data.len(),
        output.len(),
        "downsample_compressed: data length {} does not match output length {}",
        data.len(),
        output.len()
    );

    let bands = band_slices_mut(output, indptr).enumerate();
    parallelism.maybe_par_bridge_for_each_init(
        bands,
        SampleTree::new,
        |tree, (band_index, band_output)| {
            let start = offset_index(indptr[band_index]);
            let stop = offset_index(indptr[band_index + 1]);
            downsample_with(
                tree,
                &data[start..stop],
                band_output,
                samples,
                band_seed(seed, band_index),
            );
        },
    );
}
