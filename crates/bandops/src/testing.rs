//! Seeded data generators for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A random count vector with entries in `0..max_count`.
pub fn random_counts(len: usize, max_count: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..max_count)).collect()
}

/// A random row-major count matrix with entries in `0..max_count`.
pub fn random_count_matrix(n_rows: usize, n_cols: usize, max_count: u32, seed: u64) -> Vec<u32> {
    random_counts(n_rows * n_cols, max_count, seed)
}

/// An owned compressed (CSR) matrix fixture.
#[derive(Debug, Clone)]
pub struct CsrFixture {
    pub data: Vec<f32>,
    pub indices: Vec<i32>,
    pub indptr: Vec<i32>,
    pub columns: usize,
}

/// A random CSR fixture: each band holds a random number of entries
/// (up to `max_band_len`) on distinct, sorted column indices.
pub fn random_csr(bands: usize, columns: usize, max_band_len: usize, seed: u64) -> CsrFixture {
    assert!(max_band_len <= columns);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut data = Vec::new();
    let mut indices = Vec::new();
    let mut indptr = Vec::with_capacity(bands + 1);
    indptr.push(0i32);

    for _ in 0..bands {
        let band_len = rng.gen_range(0..=max_band_len);
        let mut band_columns: Vec<usize> =
            rand::seq::index::sample(&mut rng, columns, band_len).into_vec();
        band_columns.sort_unstable();
        for column in band_columns {
            indices.push(column as i32);
            data.push(rng.gen_range(0.0f32..100.0));
        }
        indptr.push(indices.len() as i32);
    }

    CsrFixture {
        data,
        indices,
        indptr,
        columns,
    }
}

impl CsrFixture {
    /// Per-column element counts (the band lengths of the transpose).
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.columns];
        for &column in &self.indices {
            counts[column as usize] += 1;
        }
        counts
    }

    /// A standard indptr for the transposed layout.
    pub fn transposed_indptr(&self) -> Vec<i32> {
        let mut indptr = Vec::with_capacity(self.columns + 1);
        indptr.push(0i32);
        for count in self.column_counts() {
            indptr.push(indptr[indptr.len() - 1] + count as i32);
        }
        indptr
    }
}
