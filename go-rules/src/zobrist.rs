//! Zobrist keys for whole-board position hashing.
//!
//! Each (cell, color) pair gets an independent random 64-bit key. The hash of a position is the
//! XOR of the keys of its occupied cells, so it only depends on where the stones are, never on
//! move order or chain labels, and can be updated one stone at a time.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::board::Board;
use crate::stone::Stone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTable {
    keys: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Keys drawn from the thread-local, OS-seeded generator.
    pub fn new(cells: usize) -> Self {
        Self::generate(cells, &mut rand::rng())
    }

    /// Reproducible keys.
    pub fn with_seed(cells: usize, seed: u64) -> Self {
        Self::generate(cells, &mut StdRng::seed_from_u64(seed))
    }

    fn generate<R: RngExt>(cells: usize, rng: &mut R) -> Self {
        ZobristTable {
            keys: (0..cells).map(|_| [rng.random(), rng.random()]).collect(),
        }
    }

    pub fn cells(&self) -> usize {
        self.keys.len()
    }

    /// Key of `stone` sitting on the cell at flat `index`.
    pub fn key(&self, index: usize, stone: Stone) -> u64 {
        self.keys[index][stone.index()]
    }

    /// Full recomputation over every occupied cell. An empty board hashes to 0.
    pub fn hash(&self, board: &Board) -> u64 {
        assert_eq!(board.cells().len(), self.cells(), "table/board size mismatch");
        board
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| Stone::from_cell(c).map(|s| self.key(i, s)))
            .fold(0, |h, k| h ^ k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tables_are_reproducible() {
        assert_eq!(ZobristTable::with_seed(81, 7), ZobristTable::with_seed(81, 7));
        assert_ne!(ZobristTable::with_seed(81, 7), ZobristTable::with_seed(81, 8));
    }

    #[test]
    fn one_key_pair_per_cell() {
        assert_eq!(ZobristTable::with_seed(6, 2).cells(), 6);
    }

    #[test]
    #[should_panic(expected = "table/board size mismatch")]
    fn rejects_board_of_another_size() {
        ZobristTable::with_seed(9, 2).hash(&Board::with_dimensions(2, 2));
    }

    #[test]
    fn empty_board_hashes_to_zero() {
        let table = ZobristTable::new(9);
        assert_eq!(table.hash(&Board::with_dimensions(3, 3)), 0);
    }

    #[test]
    fn hash_ignores_chain_labels() {
        let table = ZobristTable::with_seed(9, 1);
        let a = Board::from_layout(&["B+W", "+++", "W+B"]);
        let mut b = Board::with_dimensions(3, 3);
        // Same stones, placed in a different order so chain ids differ.
        b.place((2, 2), Stone::Black, 1);
        b.place((0, 2), Stone::White, 2);
        b.place((2, 0), Stone::White, 3);
        b.place((0, 0), Stone::Black, 4);
        assert_eq!(table.hash(&a), table.hash(&b));
    }

    #[test]
    fn color_matters() {
        let table = ZobristTable::with_seed(4, 3);
        let black = Board::from_layout(&["B+", "++"]);
        let white = Board::from_layout(&["W+", "++"]);
        assert_ne!(table.hash(&black), table.hash(&white));
    }

    #[test]
    fn toggling_a_stone_matches_full_hash() {
        let table = ZobristTable::with_seed(9, 5);
        let before = Board::from_layout(&["B++", "+W+", "+++"]);
        let after = Board::from_layout(&["B++", "+W+", "++B"]);
        let incremental = table.hash(&before) ^ table.key(8, Stone::Black);
        assert_eq!(incremental, table.hash(&after));
    }
}
