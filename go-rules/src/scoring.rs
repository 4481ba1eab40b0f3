//! Area scoring: stones on the board plus empty regions bordered by a single color.
//! Komi is not applied.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::stone::Stone;

/// Per-color score breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub stones: u32,
    pub territory: u32,
}

impl PlayerPoints {
    pub fn total(&self) -> u32 {
        self.stones + self.territory
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: PlayerPoints,
    pub white: PlayerPoints,
}

impl Score {
    pub fn get(&self, stone: Stone) -> &PlayerPoints {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    fn get_mut(&mut self, stone: Stone) -> &mut PlayerPoints {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }

    pub fn result(&self) -> String {
        format_result(self.black.total(), self.white.total())
    }
}

/// Returns "B+{diff}", "W+{diff}", or "Draw".
pub fn format_result(black: u32, white: u32) -> String {
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => format!("B+{}", black - white),
        std::cmp::Ordering::Less => format!("W+{}", white - black),
        std::cmp::Ordering::Equal => "Draw".to_string(),
    }
}

/// A maximal 4-connected set of empty cells.
struct EmptyRegion {
    cells: Vec<usize>,
    owner: Option<Stone>,
}

/// Partition the empty cells with an explicit stack, noting which colors border each region.
fn empty_regions(board: &Board) -> Vec<EmptyRegion> {
    let cells = board.cells();
    let mut visited = vec![false; cells.len()];
    let mut regions = Vec::new();

    for start in 0..cells.len() {
        if visited[start] || cells[start] != 0 {
            continue;
        }

        let mut region = Vec::new();
        let mut borders_black = false;
        let mut borders_white = false;
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(i) = stack.pop() {
            region.push(i);
            for n in board.neighbors(board.point_of(i)) {
                let ni = board.index(n);
                match Stone::from_cell(cells[ni]) {
                    Some(Stone::Black) => borders_black = true,
                    Some(Stone::White) => borders_white = true,
                    None if !visited[ni] => {
                        visited[ni] = true;
                        stack.push(ni);
                    }
                    None => {}
                }
            }
        }

        let owner = match (borders_black, borders_white) {
            (true, false) => Some(Stone::Black),
            (false, true) => Some(Stone::White),
            _ => None,
        };
        regions.push(EmptyRegion {
            cells: region,
            owner,
        });
    }

    regions
}

/// Final area score of a position.
pub fn score(board: &Board) -> Score {
    let mut score = Score::default();

    for &c in board.cells() {
        if let Some(stone) = Stone::from_cell(c) {
            score.get_mut(stone).stones += 1;
        }
    }

    for region in empty_regions(board) {
        if let Some(owner) = region.owner {
            score.get_mut(owner).territory += region.cells.len() as u32;
        }
    }

    score
}

/// Per-cell territory owner: 1 Black, -1 White, 0 for dame and occupied cells.
pub fn ownership(board: &Board) -> Vec<i8> {
    let mut owners = vec![0i8; board.cells().len()];
    for region in empty_regions(board) {
        if let Some(owner) = region.owner {
            for i in region.cells {
                owners[i] = owner.to_cell();
            }
        }
    }
    owners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_scores_nothing() {
        let board = Board::with_dimensions(5, 5);
        assert_eq!(score(&board), Score::default());
        assert!(ownership(&board).iter().all(|&o| o == 0));
    }

    #[test]
    fn single_stone_owns_whole_board() {
        let board = Board::from_layout(&["+++++", "+++++", "++B++", "+++++", "+++++"]);
        let s = score(&board);
        assert_eq!(s.black, PlayerPoints { stones: 1, territory: 24 });
        assert_eq!(s.white.total(), 0);
        assert_eq!(s.result(), "B+25");
    }

    #[test]
    fn region_touching_both_colors_is_dame() {
        let board = Board::from_layout(&["B+W", "B+W", "B+W"]);
        let s = score(&board);
        assert_eq!(s.black, PlayerPoints { stones: 3, territory: 0 });
        assert_eq!(s.white, PlayerPoints { stones: 3, territory: 0 });
        assert_eq!(s.result(), "Draw");
        let owners = ownership(&board);
        assert_eq!(owners[board.index((1, 0))], 0);
        assert_eq!(owners[board.index((1, 2))], 0);
    }

    #[test]
    fn split_board_both_territories() {
        let board = Board::from_layout(&["+B+W+", "+B+W+", "+B+W+"]);
        let s = score(&board);
        assert_eq!(s.black.territory, 3);
        assert_eq!(s.white.territory, 3);
        let owners = ownership(&board);
        assert_eq!(owners[board.index((0, 0))], 1);
        assert_eq!(owners[board.index((2, 1))], 0);
        assert_eq!(owners[board.index((4, 2))], -1);
        // Stones themselves are not territory.
        assert_eq!(owners[board.index((1, 0))], 0);
    }

    #[test]
    fn enclosed_corner_counts_only_its_cells() {
        let board = Board::from_layout(&["+W++", "WW++", "+++B", "++BB"]);
        let s = score(&board);
        // (0,0) is White's; the rest of the empty area touches both colors.
        assert_eq!(s.white, PlayerPoints { stones: 3, territory: 1 });
        assert_eq!(s.black, PlayerPoints { stones: 3, territory: 0 });
        assert_eq!(s.result(), "W+1");
    }

    #[test]
    fn large_board_fill_does_not_recurse() {
        let board = Board::with_dimensions(52, 52);
        assert!(ownership(&board).iter().all(|&o| o == 0));
        let board = Board::from_cells(52, 52, {
            let mut cells = vec![0; 52 * 52];
            cells[0] = Stone::White.to_cell();
            cells
        });
        assert_eq!(score(&board).white.territory, 52 * 52 - 1);
    }

    #[test]
    fn formats_results() {
        assert_eq!(format_result(10, 3), "B+7");
        assert_eq!(format_result(3, 10), "W+7");
        assert_eq!(format_result(4, 4), "Draw");
    }
}
