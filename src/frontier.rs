//! Track pricing as a layered DP with a sliding-window frontier.
//!
//! Layer `k` is "track of length `k`". A piece of length `l` reads layer
//! `k + 1 - l`, so the frontier only needs the last `W = max piece length`
//! rows. Memory is `O(W × C)` instead of `O(L × C)`; the answer is identical
//! to [`crate::engine::solve`], but no plan can be reconstructed.

use crate::model::TrackModel;
use crate::table::cheapest_in;
use crate::traits::LayeredProblem;
use crate::utils::{bucket_by_right, relax_cell};

/// Ring of the most recent `window` rows, plus a scratch row.
#[derive(Clone, Debug)]
pub struct RollingFrontier {
    width: usize,
    window: usize,
    /// Slot `k % window` holds row `k` for the last `window` lengths.
    rows: Vec<Option<u64>>,
    scratch: Vec<Option<u64>>,
}

impl RollingFrontier {
    fn new(width: usize, window: usize) -> Self {
        let mut rows = vec![None; width * window];
        for cell in &mut rows[..width] {
            *cell = Some(0);
        }
        Self {
            width,
            window,
            rows,
            scratch: vec![None; width],
        }
    }

    /// Row for length `len`; only valid for the last `window` lengths.
    pub fn row(&self, len: usize) -> &[Option<u64>] {
        let slot = len % self.window;
        &self.rows[slot * self.width..(slot + 1) * self.width]
    }
}

/// [`LayeredProblem`] view of a [`TrackModel`].
pub struct TrackProblem<'m> {
    model: &'m TrackModel,
    buckets: Vec<Vec<usize>>,
    window: usize,
}

impl<'m> TrackProblem<'m> {
    pub fn new(model: &'m TrackModel) -> Self {
        Self {
            model,
            buckets: bucket_by_right(model.pieces(), model.num_connections()),
            window: model.max_piece_length().max(1),
        }
    }

    /// Number of rows the frontier keeps live.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl LayeredProblem for TrackProblem<'_> {
    type Frontier = RollingFrontier;
    type Cost = Option<u64>;

    fn num_layers(&self) -> usize {
        self.model.target_length()
    }

    fn init_frontier(&self) -> RollingFrontier {
        RollingFrontier::new(self.model.num_connections(), self.window)
    }

    fn forward_step(&self, layer: usize, frontier: &mut RollingFrontier) {
        let len = layer + 1;
        let pieces = self.model.pieces();
        let mut scratch = std::mem::take(&mut frontier.scratch);
        for (c, cell) in scratch.iter_mut().enumerate() {
            *cell = relax_cell(pieces, &self.buckets[c], len, |back, left| {
                frontier.row(len - back)[left]
            });
        }
        // Row `len` replaces row `len - window`, which nothing reads anymore.
        let slot = len % frontier.window;
        let width = frontier.width;
        frontier.rows[slot * width..(slot + 1) * width].copy_from_slice(&scratch);
        frontier.scratch = scratch;
    }

    fn extract_cost(&self, frontier: &RollingFrontier) -> Option<u64> {
        cheapest_in(frontier.row(self.model.target_length())).map(|(_, price)| price)
    }
}

/// Minimum price using the rolling frontier.
pub fn solve_rolling(model: &TrackModel) -> Option<u64> {
    let problem = TrackProblem::new(model);
    let span = tracing::debug_span!(
        "solve_rolling",
        target_length = model.target_length(),
        window = problem.window()
    );
    let _enter = span.enter();
    problem.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alphabet, Connector, Piece};

    const A: Connector = Connector(0);
    const B: Connector = Connector(1);

    fn ab_model(target: usize, pieces: Vec<Piece>) -> TrackModel {
        TrackModel::new(target, Alphabet::new(vec!['A', 'B']).unwrap(), pieces).unwrap()
    }

    #[test]
    fn window_tracks_longest_piece() {
        let model = ab_model(10, vec![Piece::new(1, 3, A, B), Piece::new(1, 7, B, A)]);
        assert_eq!(TrackProblem::new(&model).window(), 7);
        assert_eq!(TrackProblem::new(&ab_model(10, vec![])).window(), 1);
    }

    #[test]
    fn window_of_one_alternates_pieces() {
        let model = ab_model(4, vec![Piece::new(5, 1, A, B), Piece::new(3, 1, B, A)]);
        // A-B, B-A, A-B, B-A from the empty start, or starting on B-A first.
        assert_eq!(solve_rolling(&model), Some(16));
    }

    #[test]
    fn longest_piece_reads_oldest_row() {
        let model = ab_model(5, vec![Piece::new(2, 1, A, A), Piece::new(1, 4, A, A)]);
        // 4 + 1: 1 + 2 = 3 beats five unit pieces at 10.
        assert_eq!(solve_rolling(&model), Some(3));
    }

    #[test]
    fn empty_catalog_only_builds_empty_track() {
        assert_eq!(solve_rolling(&ab_model(0, vec![])), Some(0));
        assert_eq!(solve_rolling(&ab_model(3, vec![])), None);
    }
}
