//! Assorted helpers shared by the solvers.

use crate::model::Piece;

/// Strategy chosen by [`crate::builder::SolverBuilder`] when the caller does
/// not pick one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Full `(L+1) × C` table; supports plan reconstruction.
    Dense,
    /// Sliding window of the last `max_piece_length` rows; price only.
    Rolling,
}

/// Rows below which the dense table is always preferred.
pub const DENSE_ROW_LIMIT: usize = 4096;

/// Heuristic strategy for a target length and a rolling window size.
///
/// Dense is kept for small targets and whenever the window is not at least
/// eight times shorter than the table.
#[inline]
pub fn default_strategy(target_length: usize, window: usize) -> Strategy {
    let rows = target_length + 1;
    if rows <= DENSE_ROW_LIMIT || window.max(1).saturating_mul(8) > rows {
        Strategy::Dense
    } else {
        Strategy::Rolling
    }
}

/// Catalog indices grouped by right connector.
///
/// Within a bucket, indices keep catalog order.
pub fn bucket_by_right(pieces: &[Piece], num_connections: usize) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); num_connections];
    for (idx, piece) in pieces.iter().enumerate() {
        buckets[piece.right.0].push(idx);
    }
    buckets
}

/// Cheapest way to finish on one connector, given read access to earlier rows.
///
/// `lookup(back, connector)` must return the cell `back` rows before the row
/// being computed (`back >= 1`).
#[inline]
pub(crate) fn relax_cell<F>(pieces: &[Piece], bucket: &[usize], len: usize, lookup: F) -> Option<u64>
where
    F: Fn(usize, usize) -> Option<u64>,
{
    let mut best: Option<u64> = None;
    for &idx in bucket {
        let piece = &pieces[idx];
        let back = piece.len();
        if back > len {
            continue;
        }
        if let Some(prev) = lookup(back, piece.left.0) {
            let cand = prev + u64::from(piece.price);
            best = Some(best.map_or(cand, |b| b.min(cand)));
        }
    }
    best
}
