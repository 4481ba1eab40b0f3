use std::collections::{HashMap, HashSet};

use arrayvec::ArrayVec;
use tracing::trace;

use crate::Point;
use crate::stone::Stone;

/// Identifies a chain of connected same-colored stones. Ids are never reused within a game.
pub type ChainId = u32;

/// Chain id of empty and off-board cells.
pub const NO_CHAIN: ChainId = 0;

/// The four orthogonal neighbors in North, South, West, East order, including off-board ones.
pub fn adjacent((x, y): Point) -> [Point; 4] {
    [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
}

/// Stone grid with incremental chain and liberty bookkeeping.
///
/// Cells are stored row-major as `i8` (see [`Stone::to_cell`]), with a parallel grid of
/// chain ids. Every live chain has an entry in the liberty map.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    stones: Vec<i8>,
    chains: Vec<ChainId>,
    liberties: HashMap<ChainId, u32>,
    next_chain_id: ChainId,
    last_removed: Vec<Point>,
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Board {
            cols: self.cols,
            rows: self.rows,
            stones: self.stones.clone(),
            chains: self.chains.clone(),
            liberties: self.liberties.clone(),
            next_chain_id: self.next_chain_id,
            last_removed: self.last_removed.clone(),
        }
    }

    // Reuses the existing allocations; the scratch board is refreshed once per move.
    fn clone_from(&mut self, source: &Self) {
        self.cols = source.cols;
        self.rows = source.rows;
        self.stones.clone_from(&source.stones);
        self.chains.clone_from(&source.chains);
        self.liberties.clone_from(&source.liberties);
        self.next_chain_id = source.next_chain_id;
        self.last_removed.clone_from(&source.last_removed);
    }
}

impl Board {
    /// Create an empty board with the given dimensions.
    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        let size = cols as usize * rows as usize;
        Board {
            cols,
            rows,
            stones: vec![0; size],
            chains: vec![NO_CHAIN; size],
            liberties: HashMap::new(),
            next_chain_id: 1,
            last_removed: Vec::with_capacity(size),
        }
    }

    /// Build a board from raw cells, deriving chains and liberties by flood fill.
    /// Chain ids are assigned in row-major order of each chain's first stone.
    pub fn from_cells(cols: u8, rows: u8, cells: Vec<i8>) -> Self {
        let mut board = Board::with_dimensions(cols, rows);
        assert_eq!(cells.len(), board.stones.len(), "malformed board cells");
        board.stones = cells.into_iter().map(i8::signum).collect();

        for start in 0..board.stones.len() {
            if board.stones[start] == 0 || board.chains[start] != NO_CHAIN {
                continue;
            }
            let chain = board.next_chain_id;
            board.increment_next_chain_id();

            let color = board.stones[start];
            let mut libs = HashSet::new();
            let mut stack = vec![start];
            board.chains[start] = chain;
            while let Some(i) = stack.pop() {
                for n in board.neighbors(board.point_of(i)) {
                    let ni = board.index(n);
                    if board.stones[ni] == 0 {
                        libs.insert(ni);
                    } else if board.stones[ni] == color && board.chains[ni] == NO_CHAIN {
                        board.chains[ni] = chain;
                        stack.push(ni);
                    }
                }
            }
            board.liberties.insert(chain, libs.len() as u32);
        }

        board
    }

    /// Clear every stone and chain. Dimensions are kept.
    pub fn reset(&mut self) {
        self.stones.fill(0);
        self.chains.fill(NO_CHAIN);
        self.liberties.clear();
        self.next_chain_id = 1;
        self.last_removed.clear();
    }

    // -- Accessors --

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Row-major cells: 1 Black, -1 White, 0 empty.
    pub fn cells(&self) -> &[i8] {
        &self.stones
    }

    pub fn is_empty(&self) -> bool {
        self.stones.iter().all(|&s| s == 0)
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x >= 0 && y >= 0 && x < self.cols as i16 && y < self.rows as i16
    }

    /// Flat index of an on-board point. Panics off the board.
    pub fn index(&self, point: Point) -> usize {
        assert!(self.on_board(point), "point {point:?} is off the board");
        point.1 as usize * self.cols as usize + point.0 as usize
    }

    pub fn point_of(&self, index: usize) -> Point {
        let cols = self.cols as usize;
        ((index % cols) as i16, (index / cols) as i16)
    }

    /// Stone at an on-board point. Panics off the board.
    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        Stone::from_cell(self.stones[self.index(point)])
    }

    pub fn is_vacant(&self, point: Point) -> bool {
        self.stone_at(point).is_none()
    }

    /// Chain id at a point; [`NO_CHAIN`] for empty or off-board points.
    pub fn chain_at(&self, point: Point) -> ChainId {
        if self.on_board(point) {
            self.chains[self.index(point)]
        } else {
            NO_CHAIN
        }
    }

    /// On-board orthogonal neighbors, North, South, West, East.
    pub fn neighbors(&self, point: Point) -> ArrayVec<Point, 4> {
        adjacent(point)
            .into_iter()
            .filter(|&n| self.on_board(n))
            .collect()
    }

    pub fn is_next_to_chain(&self, point: Point, chain: ChainId) -> bool {
        debug_assert_ne!(chain, NO_CHAIN);
        adjacent(point).iter().any(|&n| self.chain_at(n) == chain)
    }

    pub fn is_live(&self, chain: ChainId) -> bool {
        self.liberties.contains_key(&chain)
    }

    /// Liberty count of a live chain. Panics if the chain is not live.
    pub fn liberties_of(&self, chain: ChainId) -> u32 {
        match self.liberties.get(&chain) {
            Some(&n) => n,
            None => panic!("chain {chain} is not live"),
        }
    }

    pub fn live_chains(&self) -> usize {
        self.liberties.len()
    }

    /// Stones cleared by the most recent [`Board::remove_chain`].
    pub fn last_removed(&self) -> &[Point] {
        &self.last_removed
    }

    // -- Chain id allocation --

    /// The id a brand-new chain would receive.
    pub fn next_chain_id(&self) -> ChainId {
        self.next_chain_id
    }

    pub fn increment_next_chain_id(&mut self) {
        self.next_chain_id += 1;
    }

    // -- Mutation --

    /// Put a stone on a vacant point and label it with `chain`.
    pub fn place(&mut self, point: Point, stone: Stone, chain: ChainId) {
        let i = self.index(point);
        assert_eq!(self.stones[i], 0, "point {point:?} is occupied");
        assert_ne!(chain, NO_CHAIN, "stones must belong to a chain");
        self.stones[i] = stone.to_cell();
        self.chains[i] = chain;
    }

    pub fn set_liberties(&mut self, chain: ChainId, count: u32) {
        self.liberties.insert(chain, count);
    }

    pub fn add_liberties(&mut self, chain: ChainId, count: u32) {
        *self.live_entry(chain) += count;
    }

    pub fn increment_liberties(&mut self, chain: ChainId) {
        self.add_liberties(chain, 1);
    }

    /// Take one liberty from a chain and return what is left.
    pub fn decrement_liberties(&mut self, chain: ChainId) -> u32 {
        let libs = self.live_entry(chain);
        assert!(*libs > 0, "chain {chain} has no liberty left to lose");
        *libs -= 1;
        *libs
    }

    fn live_entry(&mut self, chain: ChainId) -> &mut u32 {
        match self.liberties.get_mut(&chain) {
            Some(n) => n,
            None => panic!("chain {chain} is not live"),
        }
    }

    /// Number of empty points that are liberties of both chains. One pass over the grid.
    pub fn common_liberties(&self, chain1: ChainId, chain2: ChainId) -> usize {
        let mut libs1 = HashSet::new();
        let mut libs2 = HashSet::new();

        for (i, &chain) in self.chains.iter().enumerate() {
            let libs = if chain == chain1 {
                &mut libs1
            } else if chain == chain2 {
                &mut libs2
            } else {
                continue;
            };
            for n in self.neighbors(self.point_of(i)) {
                if self.is_vacant(n) {
                    libs.insert(n);
                }
            }
        }

        libs1.intersection(&libs2).count()
    }

    /// Merge the chains under two same-colored stones into the lower id.
    ///
    /// Meant to be called right after a stone is placed at `point`: both chains still count
    /// `point` as a liberty, so the merged count is `a + b - common - 1`. The merged chain keeps
    /// counting `point` once, until the caller takes it away. No-op for empty, off-board,
    /// differently colored or already shared points.
    pub fn fuse_chains(&mut self, point: Point, neighbor: Point) {
        if !self.on_board(point) || !self.on_board(neighbor) {
            return;
        }
        match (self.stone_at(point), self.stone_at(neighbor)) {
            (Some(a), Some(b)) if a == b => {}
            _ => return,
        }

        let (c1, c2) = (self.chain_at(point), self.chain_at(neighbor));
        if c1 == NO_CHAIN || c2 == NO_CHAIN || c1 == c2 {
            return;
        }
        let (keep, absorbed) = (c1.min(c2), c1.max(c2));

        let common = self.common_liberties(keep, absorbed) as u32;
        let total = self.liberties_of(keep) + self.liberties_of(absorbed);
        let merged = total
            .checked_sub(common + 1)
            .unwrap_or_else(|| panic!("fusing chains {keep} and {absorbed} underflows"));

        for id in self.chains.iter_mut().filter(|id| **id == absorbed) {
            *id = keep;
        }
        self.liberties.remove(&absorbed);
        self.liberties.insert(keep, merged);

        trace!(keep, absorbed, common, merged, "fused chains");
    }

    /// Clear every stone of `chain`, record the cleared points and retire the id.
    pub fn remove_chain(&mut self, chain: ChainId) {
        assert_ne!(chain, NO_CHAIN, "cannot remove the empty chain");
        self.last_removed.clear();

        for i in 0..self.chains.len() {
            if self.chains[i] == chain {
                let point = self.point_of(i);
                self.stones[i] = 0;
                self.chains[i] = NO_CHAIN;
                self.last_removed.push(point);
            }
        }
        self.liberties.remove(&chain);

        trace!(chain, stones = self.last_removed.len(), "removed chain");
    }

    /// Build a board from an ASCII layout. 'B' = Black, 'W' = White, '+' = Empty.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Board {
        let rows = layout.len() as u8;
        let cols = layout[0].len() as u8;
        let cells = layout
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                'B' => Stone::Black.to_cell(),
                'W' => Stone::White.to_cell(),
                _ => 0,
            })
            .collect();
        Board::from_cells(cols, rows, cells)
    }

    /// Recompute chains and liberties from scratch and check them against the bookkeeping.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen_chains = HashSet::new();

        for i in 0..self.stones.len() {
            let point = self.point_of(i);
            let chain = self.chains[i];
            assert_eq!(
                self.stones[i] == 0,
                chain == NO_CHAIN,
                "occupancy and chain id disagree at {point:?}"
            );
            if chain == NO_CHAIN {
                continue;
            }
            assert!(chain < self.next_chain_id, "chain {chain} was never allocated");
            for n in self.neighbors(point) {
                let ni = self.index(n);
                if self.stones[ni] == self.stones[i] {
                    assert_eq!(self.chains[ni], chain, "split chain at {point:?}/{n:?}");
                } else {
                    assert_ne!(self.chains[ni], chain, "mixed chain at {point:?}/{n:?}");
                }
            }
            if !seen_chains.insert(chain) {
                continue;
            }

            // Flood fill from the first stone: the chain must be connected.
            let mut members = HashSet::from([i]);
            let mut libs = HashSet::new();
            let mut stack = vec![i];
            while let Some(j) = stack.pop() {
                for n in self.neighbors(self.point_of(j)) {
                    let nj = self.index(n);
                    if self.stones[nj] == 0 {
                        libs.insert(nj);
                    } else if self.chains[nj] == chain && members.insert(nj) {
                        stack.push(nj);
                    }
                }
            }
            let size = self.chains.iter().filter(|&&c| c == chain).count();
            assert_eq!(members.len(), size, "chain {chain} is disconnected");
            assert_eq!(
                self.liberties_of(chain),
                libs.len() as u32,
                "wrong liberty count for chain {chain}"
            );
        }

        let live: HashSet<ChainId> = self.liberties.keys().copied().collect();
        assert_eq!(live, seen_chains, "liberty map and grid disagree on live chains");
    }
}
