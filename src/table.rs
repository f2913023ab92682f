//! Dense cost table used by the engine.
//!
//! `table[len][c]` holds the cheapest price of a track of exactly `len` units
//! whose last piece exposes connector `c` on its right, or `None` when no
//! such track exists. Rows are stored contiguously, row `len` occupying
//! `cells[len * width .. (len + 1) * width]`.

use crate::model::Connector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable {
    width: usize,
    cells: Vec<Option<u64>>,
}

impl CostTable {
    /// Allocate a table for lengths `0..=target_length` with row 0 set to zero
    /// and every other cell unreachable.
    ///
    /// # Panics
    /// Panics if `(target_length + 1) * width` does not fit in `usize`.
    /// Targets coming from a [`crate::model::TrackModel`] are bounded by
    /// [`crate::model::MAX_TARGET_LENGTH`].
    pub fn new(target_length: usize, width: usize) -> Self {
        let size = target_length
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(width))
            .expect("cost table size overflows usize");
        let mut cells = vec![None; size];
        for cell in &mut cells[..width] {
            *cell = Some(0);
        }
        Self { width, cells }
    }

    #[inline]
    pub fn num_connections(&self) -> usize {
        self.width
    }

    /// Largest length covered by the table.
    #[inline]
    pub fn target_length(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.cells.len() / self.width - 1
        }
    }

    #[inline]
    pub fn get(&self, len: usize, connector: Connector) -> Option<u64> {
        self.row(len)[connector.0]
    }

    #[inline]
    pub fn row(&self, len: usize) -> &[Option<u64>] {
        &self.cells[len * self.width..(len + 1) * self.width]
    }

    /// Rows `0..len` (read-only) and row `len` (writable).
    pub(crate) fn split_row_mut(&mut self, len: usize) -> (&[Option<u64>], &mut [Option<u64>]) {
        let (done, rest) = self.cells.split_at_mut(len * self.width);
        (done, &mut rest[..self.width])
    }

    /// Cheapest reachable cell on row `len`; ties go to the lowest connector.
    pub fn cheapest_at(&self, len: usize) -> Option<(Connector, u64)> {
        cheapest_in(self.row(len))
    }
}

pub(crate) fn cheapest_in(row: &[Option<u64>]) -> Option<(Connector, u64)> {
    row.iter()
        .enumerate()
        .filter_map(|(c, cell)| cell.map(|price| (Connector(c), price)))
        .min_by_key(|&(_, price)| price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_zero_is_free_everywhere() {
        let table = CostTable::new(4, 3);
        assert_eq!(table.row(0), &[Some(0), Some(0), Some(0)]);
        assert!(table.row(4).iter().all(Option::is_none));
        assert_eq!(table.target_length(), 4);
        assert_eq!(table.num_connections(), 3);
    }

    #[test]
    fn zero_target_has_single_row() {
        let table = CostTable::new(0, 2);
        assert_eq!(table.target_length(), 0);
        assert_eq!(table.cheapest_at(0), Some((Connector(0), 0)));
    }

    #[test]
    #[should_panic(expected = "cost table size overflows usize")]
    fn oversized_table_panics_instead_of_wrapping() {
        let _ = CostTable::new(usize::MAX, 1);
    }

    #[test]
    fn cheapest_prefers_lowest_connector_on_ties() {
        let mut table = CostTable::new(1, 3);
        {
            let (_, row) = table.split_row_mut(1);
            row[0] = None;
            row[1] = Some(7);
            row[2] = Some(7);
        }
        assert_eq!(table.cheapest_at(1), Some((Connector(1), 7)));
        assert_eq!(table.get(1, Connector(0)), None);
    }
}
