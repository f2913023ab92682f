//! Dense cost-table engine.
//!
//! The engine fills a [`CostTable`] bottom-up over track length:
//! 1. Row 0 is zero for every connector: the empty track accepts any piece.
//! 2. Row `len` reads only rows `len - piece.length`, all strictly smaller,
//!    so a single ascending pass never reads a row before it is complete.
//! 3. The answer is the cheapest reachable cell of row `L`.
//!
//! Pieces are bucketed by right connector once, so each cell only scans the
//! pieces that can end there. With the `parallel` feature the cells of one
//! row are filled concurrently; rows stay sequential.

use crate::model::{Connector, TrackModel};
use crate::table::CostTable;
use crate::utils::{bucket_by_right, relax_cell};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One cheapest track: its price and the catalog indices it uses, left to right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackPlan {
    pub price: u64,
    pub pieces: Vec<usize>,
}

/// Minimum price engine over a borrowed [`TrackModel`].
///
/// ```
/// use railway_planner::model::{Alphabet, Connector, Piece, TrackModel};
/// use railway_planner::CostTableEngine;
///
/// let alphabet = Alphabet::new(vec!['A', 'B']).unwrap();
/// let pieces = vec![
///     Piece::new(5, 1, Connector(0), Connector(1)),
///     Piece::new(3, 1, Connector(1), Connector(0)),
/// ];
/// let model = TrackModel::new(2, alphabet, pieces).unwrap();
/// assert_eq!(CostTableEngine::new(&model).solve(), Some(8));
/// ```
pub struct CostTableEngine<'m> {
    model: &'m TrackModel,
    buckets: Vec<Vec<usize>>,
}

impl<'m> CostTableEngine<'m> {
    pub fn new(model: &'m TrackModel) -> Self {
        let buckets = bucket_by_right(model.pieces(), model.num_connections());
        Self { model, buckets }
    }

    /// Fill the full `(L+1) × C` table.
    pub fn build_table(&self) -> CostTable {
        let target_length = self.model.target_length();
        let width = self.model.num_connections();
        let span = tracing::debug_span!("build_table", target_length, width);
        let _enter = span.enter();

        let mut table = CostTable::new(target_length, width);
        for len in 1..=target_length {
            let _row = tracing::trace_span!("fill_row", len).entered();
            let (done, row) = table.split_row_mut(len);
            self.fill_row(len, done, row);
        }
        tracing::trace!(
            reachable = table.row(target_length).iter().filter(|c| c.is_some()).count(),
            "table complete"
        );
        table
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_row(&self, len: usize, done: &[Option<u64>], row: &mut [Option<u64>]) {
        let width = row.len();
        let pieces = self.model.pieces();
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = relax_cell(pieces, &self.buckets[c], len, |back, left| {
                done[(len - back) * width + left]
            });
        }
    }

    #[cfg(feature = "parallel")]
    fn fill_row(&self, len: usize, done: &[Option<u64>], row: &mut [Option<u64>]) {
        let width = row.len();
        let pieces = self.model.pieces();
        row.par_iter_mut().enumerate().for_each(|(c, cell)| {
            *cell = relax_cell(pieces, &self.buckets[c], len, |back, left| {
                done[(len - back) * width + left]
            });
        });
    }

    /// Minimum price for the model's target length, `None` when unsolvable.
    pub fn solve(&self) -> Option<u64> {
        let table = self.build_table();
        let best = table
            .cheapest_at(self.model.target_length())
            .map(|(_, price)| price);
        tracing::debug!(target_length = self.model.target_length(), ?best, "solved");
        best
    }

    /// Cheapest price together with one track achieving it.
    pub fn plan(&self) -> Option<TrackPlan> {
        let table = self.build_table();
        self.plan_from(&table)
    }

    /// Reconstruct a cheapest track from an already filled table.
    ///
    /// The table must have been produced by this engine's [`build_table`].
    ///
    /// [`build_table`]: CostTableEngine::build_table
    pub fn plan_from(&self, table: &CostTable) -> Option<TrackPlan> {
        let pieces = self.model.pieces();
        let mut len = table.target_length();
        let (mut connector, price) = table.cheapest_at(len)?;
        let mut used = Vec::new();

        while len > 0 {
            let want = table.get(len, connector)?;
            let idx = self.buckets[connector.0].iter().copied().find(|&idx| {
                let piece = &pieces[idx];
                piece.len() <= len
                    && table
                        .get(len - piece.len(), piece.left)
                        .is_some_and(|prev| prev + u64::from(piece.price) == want)
            })?;
            used.push(idx);
            len -= pieces[idx].len();
            connector = pieces[idx].left;
        }
        used.reverse();
        Some(TrackPlan {
            price,
            pieces: used,
        })
    }

    /// Pieces whose right connector is `connector`, in catalog order.
    pub fn pieces_ending_with(&self, connector: Connector) -> &[usize] {
        &self.buckets[connector.0]
    }
}

/// Minimum price to build a track of exactly the model's target length.
pub fn solve(model: &TrackModel) -> Option<u64> {
    CostTableEngine::new(model).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alphabet, Piece};

    fn ab_model(target: usize, pieces: Vec<Piece>) -> TrackModel {
        TrackModel::new(target, Alphabet::new(vec!['A', 'B']).unwrap(), pieces).unwrap()
    }

    const A: Connector = Connector(0);
    const B: Connector = Connector(1);

    #[test]
    fn row_zero_is_zero() {
        let model = ab_model(3, vec![Piece::new(5, 1, A, B)]);
        let table = CostTableEngine::new(&model).build_table();
        assert_eq!(table.row(0), &[Some(0), Some(0)]);
    }

    #[test]
    fn single_piece_fills_only_its_connector() {
        let model = ab_model(2, vec![Piece::new(5, 1, A, B)]);
        let table = CostTableEngine::new(&model).build_table();
        assert_eq!(table.row(1), &[None, Some(5)]);
        assert_eq!(table.row(2), &[None, None]);
    }

    #[test]
    fn plan_walks_back_through_connectors() {
        let model = ab_model(3, vec![Piece::new(5, 1, A, B), Piece::new(3, 2, B, A)]);
        let plan = CostTableEngine::new(&model).plan().unwrap();
        assert_eq!(plan.price, 8);
        assert_eq!(plan.pieces, vec![0, 1]);
    }

    #[test]
    fn empty_target_plan_is_empty() {
        let model = ab_model(0, vec![]);
        let plan = CostTableEngine::new(&model).plan().unwrap();
        assert_eq!(plan, TrackPlan { price: 0, pieces: vec![] });
    }

    #[test]
    fn each_row_fill_opens_its_own_span() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing::span;
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::Layer;

        struct RowSpans(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for RowSpans {
            fn on_new_span(&self, attrs: &span::Attributes<'_>, _: &span::Id, _: Context<'_, S>) {
                if attrs.metadata().name() == "fill_row" {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let rows = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(RowSpans(Arc::clone(&rows)));
        let model = ab_model(6, vec![Piece::new(5, 1, A, B), Piece::new(3, 2, B, A)]);
        let table = tracing::subscriber::with_default(subscriber, || {
            CostTableEngine::new(&model).build_table()
        });
        assert_eq!(rows.load(Ordering::SeqCst), 6);
        assert_eq!(table, CostTableEngine::new(&model).build_table());
    }

    #[test]
    fn buckets_follow_right_connector() {
        let model = ab_model(1, vec![Piece::new(5, 1, A, B), Piece::new(3, 1, B, A)]);
        let engine = CostTableEngine::new(&model);
        assert_eq!(engine.pieces_ending_with(A), &[1]);
        assert_eq!(engine.pieces_ending_with(B), &[0]);
    }
}
