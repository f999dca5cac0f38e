//! Tournament tree for weighted sampling without replacement.

use num_traits::ToPrimitive;

/// An implicit complete binary tree of running sums over leaf weights.
///
/// Storage is a single array laid out leaves-first: the leaf level has
/// `p = n.next_power_of_two()` slots (input weights zero-padded above
/// `n`), each parent level of size `s` starts at position
/// `2 * (p - s)`, and the root (level size 1) sits at `2p - 2`,
/// for `2p - 1` nodes total. Each internal node holds the sum of its
/// two children; the root holds the total remaining weight.
///
/// A draw descends root → leaf and decrements every node it visits, so
/// `m` sequential draws remove `m` units from the pool, distributed by
/// the evolving weights — a multivariate-hypergeometric draw. Because
/// draws mutate the tree they must never run concurrently; the tree is
/// a per-band scratch object, rebuilt before each draw sequence.
#[derive(Debug, Default)]
pub struct SampleTree {
    nodes: Vec<usize>,
    leaves: usize,
}

impl SampleTree {
    /// Create an empty tree; [`rebuild`](Self::rebuild) sizes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the tree over `weights`.
    ///
    /// Weights must be non-negative; float weights are truncated to
    /// integer counts. Requires at least two weights (a single-weight
    /// pool needs no tree).
    pub fn rebuild<D: Copy + ToPrimitive>(&mut self, weights: &[D]) {
        assert!(
            weights.len() >= 2,
            "sample tree needs at least two weights, got {}",
            weights.len()
        );
        let p = weights.len().next_power_of_two();
        self.leaves = p;
        self.nodes.clear();
        self.nodes.resize(2 * p - 1, 0);

        for (node, weight) in self.nodes.iter_mut().zip(weights) {
            *node = weight
                .to_usize()
                .expect("sample tree weights must be non-negative integers");
        }

        // Sum pairwise, level by level towards the root.
        let mut base = 0;
        let mut size = p;
        while size > 1 {
            let parent_base = base + size;
            for position in 0..size / 2 {
                self.nodes[parent_base + position] =
                    self.nodes[base + 2 * position] + self.nodes[base + 2 * position + 1];
            }
            base = parent_base;
            size /= 2;
        }
    }

    /// Total remaining weight (the root).
    #[inline]
    pub fn total(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Draw one unit from the pool; `remaining` must be uniform in
    /// `[0, total())`.
    ///
    /// Descends from the root, going left while `remaining` is below
    /// the left child's current weight and otherwise subtracting it and
    /// going right; every visited node is decremented by one. Returns
    /// the sampled leaf index.
    pub fn draw(&mut self, mut remaining: usize) -> usize {
        let p = self.leaves;
        debug_assert!(p >= 2, "draw from an unbuilt tree");

        let mut size = 1;
        let mut position = 0;
        loop {
            let node = 2 * (p - size) + position;
            debug_assert!(
                self.nodes[node] > remaining,
                "draw value {remaining} exceeds subtree weight {}",
                self.nodes[node]
            );
            self.nodes[node] -= 1;
            if size == p {
                return position;
            }

            size *= 2;
            position *= 2;
            let left = self.nodes[2 * (p - size) + position];
            if remaining >= left {
                remaining -= left;
                position += 1;
            }
        }
    }
}
