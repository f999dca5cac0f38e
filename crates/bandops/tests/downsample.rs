use bandops::testing::{random_count_matrix, random_csr};
use bandops::{
    downsample_compressed, downsample_into, downsample_matrix, DenseView, DenseViewMut,
    Parallelism,
};

#[test]
fn downsample_preserves_totals_and_bounds() {
    for seed in 1..20u64 {
        let input: Vec<u32> = random_count_matrix(1, 50, 20, seed);
        let total: u32 = input.iter().sum();
        for samples in [0usize, 1, 10, total as usize / 2, total as usize + 5] {
            let mut output = vec![0u32; input.len()];
            downsample_into(&input, &mut output, samples, seed);

            let output_total: u32 = output.iter().sum();
            assert_eq!(output_total as usize, samples.min(total as usize));
            for (out, input) in output.iter().zip(&input) {
                assert!(out <= input);
            }
        }
    }
}

#[test]
fn two_draws_from_four_unit_weights() {
    let input = [1u32, 1, 1, 1];

    let mut output = [0u32; 4];
    downsample_into(&input, &mut output, 2, 7);

    assert_eq!(output.iter().sum::<u32>(), 2);
    assert!(output.iter().all(|&count| count <= 1));

    // Same seed, same picks.
    let mut repeat = [0u32; 4];
    downsample_into(&input, &mut repeat, 2, 7);
    assert_eq!(output, repeat);
}

#[test]
fn matrix_rows_match_standalone_downsampling() {
    let n_rows = 6;
    let n_cols = 40;
    let data = random_count_matrix(n_rows, n_cols, 30, 11);
    let input = DenseView::from_slice(&data, n_rows, n_cols, "counts");

    let mut output = vec![0u32; data.len()];
    let mut output_view = DenseViewMut::from_slice(&mut output, n_rows, n_cols, "output");
    downsample_matrix(Parallelism::Sequential, &input, &mut output_view, 100, 3);

    for row in 0..n_rows {
        let mut expected = vec![0u32; n_cols];
        downsample_into(
            &data[row * n_cols..(row + 1) * n_cols],
            &mut expected,
            100,
            bandops::band_seed(3, row),
        );
        assert_eq!(&output[row * n_cols..(row + 1) * n_cols], expected);
    }
}

#[test]
fn matrix_parallel_matches_sequential() {
    let n_rows = 16;
    let n_cols = 64;
    let data = random_count_matrix(n_rows, n_cols, 25, 5);
    let input = DenseView::from_slice(&data, n_rows, n_cols, "counts");

    let mut sequential = vec![0u32; data.len()];
    let mut sequential_view = DenseViewMut::from_slice(&mut sequential, n_rows, n_cols, "output");
    downsample_matrix(Parallelism::Sequential, &input, &mut sequential_view, 200, 9);

    let mut parallel = vec![0u32; data.len()];
    let mut parallel_view = DenseViewMut::from_slice(&mut parallel, n_rows, n_cols, "output");
    downsample_matrix(Parallelism::Parallel, &input, &mut parallel_view, 200, 9);

    assert_eq!(sequential, parallel);
}

#[test]
fn compressed_bands_match_standalone_downsampling() {
    let fixture = random_csr(10, 30, 25, 7);
    let data: Vec<u32> = fixture.data.iter().map(|&v| v as u32).collect();

    let mut output = vec![0u32; data.len()];
    downsample_compressed(
        Parallelism::Parallel,
        &data,
        &fixture.indptr,
        &mut output,
        40,
        13,
    );

    for band in 0..fixture.indptr.len() - 1 {
        let start = fixture.indptr[band] as usize;
        let stop = fixture.indptr[band + 1] as usize;
        let mut expected = vec![0u32; stop - start];
        downsample_into(
            &data[start..stop],
            &mut expected,
            40,
            bandops::band_seed(13, band),
        );
        assert_eq!(&output[start..stop], expected);
    }
}

#[test]
fn seed_zero_gives_every_row_the_same_stream() {
    let n_cols = 32;
    let row: Vec<u32> = random_count_matrix(1, n_cols, 20, 21);
    let mut data = row.clone();
    data.extend_from_slice(&row);
    let input = DenseView::from_slice(&data, 2, n_cols, "counts");

    let mut output = vec![0u32; data.len()];
    let mut output_view = DenseViewMut::from_slice(&mut output, 2, n_cols, "output");
    downsample_matrix(Parallelism::Sequential, &input, &mut output_view, 50, 0);

    assert_eq!(&output[..n_cols], &output[n_cols..]);
}

#[test]
fn distinct_seeds_give_rows_distinct_streams() {
    let n_cols = 64;
    let row: Vec<u32> = vec![4; n_cols];
    let mut data = row.clone();
    data.extend_from_slice(&row);
    let input = DenseView::from_slice(&data, 2, n_cols, "counts");

    let mut output = vec![0u32; data.len()];
    let mut output_view = DenseViewMut::from_slice(&mut output, 2, n_cols, "output");
    downsample_matrix(Parallelism::Sequential, &input, &mut output_view, 80, 21);

    assert_ne!(&output[..n_cols], &output[n_cols..]);
}
