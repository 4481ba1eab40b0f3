//! Placement legality and the incremental apply sequence.
//!
//! [`check_placement`] is a fast reject based on the current liberty counts. The authoritative
//! answer comes from running [`apply_placement`] on a scratch board and looking at the result.

use arrayvec::ArrayVec;

use crate::Point;
use crate::board::{Board, ChainId, NO_CHAIN, adjacent};
use crate::error::MoveError;
use crate::stone::Stone;

/// Chain a stone at `point` would join: the lowest id among same-colored neighbors, or the
/// allocator's next id when it touches none.
pub fn prospective_chain(board: &Board, point: Point, stone: Stone) -> ChainId {
    board
        .neighbors(point)
        .into_iter()
        .filter(|&n| board.stone_at(n) == Some(stone))
        .map(|n| board.chain_at(n))
        .fold(board.next_chain_id(), ChainId::min)
}

/// Empty neighbors of `point` that are not already liberties of `chain`.
pub fn direct_liberties(board: &Board, point: Point, chain: ChainId) -> u32 {
    board
        .neighbors(point)
        .into_iter()
        .filter(|&n| board.is_vacant(n) && !board.is_next_to_chain(n, chain))
        .count() as u32
}

/// Some adjacent opponent chain is in atari, so playing here takes it.
fn could_capture(board: &Board, point: Point, stone: Stone) -> bool {
    board.neighbors(point).into_iter().any(|n| {
        board.stone_at(n) == Some(stone.opp()) && board.liberties_of(board.chain_at(n)) == 1
    })
}

/// Some adjacent friendly chain keeps a liberty after giving up `point`.
fn connects_with_spare_liberty(board: &Board, point: Point, stone: Stone) -> bool {
    board.neighbors(point).into_iter().any(|n| {
        board.stone_at(n) == Some(stone) && board.liberties_of(board.chain_at(n)) >= 2
    })
}

/// Pre-move checks. Returns the prospective chain id when the move may be legal.
pub fn check_placement(board: &Board, point: Point, stone: Stone) -> Result<ChainId, MoveError> {
    if !board.on_board(point) {
        return Err(MoveError::NotOnBoard);
    }
    if !board.is_vacant(point) {
        return Err(MoveError::Occupied);
    }

    let chain = prospective_chain(board, point, stone);
    let mut liberties = direct_liberties(board, point, chain);
    if chain != board.next_chain_id() {
        // `point` itself was one of the chain's liberties.
        liberties += board.liberties_of(chain) - 1;
    }

    if liberties == 0
        && !could_capture(board, point, stone)
        && !connects_with_spare_liberty(board, point, stone)
    {
        return Err(MoveError::Suicide);
    }

    Ok(chain)
}

/// Place `stone` at `point` as part of `chain`, fuse with neighbors, update liberties and
/// resolve captures. Returns every point cleared by captures, in removal order.
///
/// `chain` must come from [`prospective_chain`] on the same board.
pub fn apply_placement(board: &mut Board, point: Point, stone: Stone, chain: ChainId) -> Vec<Point> {
    let direct = direct_liberties(board, point, chain);

    if chain == board.next_chain_id() {
        board.set_liberties(chain, 0);
        board.increment_next_chain_id();
    }
    board.place(point, stone, chain);

    for n in adjacent(point) {
        board.fuse_chains(point, n);
    }
    board.add_liberties(board.chain_at(point), direct);

    let mut captured = Vec::new();
    decrease_liberties_of_adjacent_chains(board, point, &mut captured);
    captured
}

/// Every chain touching the freshly filled `point` loses that liberty, each exactly once.
/// The stone's own chain is handled last so opponent captures are credited first.
fn decrease_liberties_of_adjacent_chains(board: &mut Board, point: Point, captured: &mut Vec<Point>) {
    let own = board.chain_at(point);
    let mut own_touched = false;
    let mut done: ArrayVec<ChainId, 4> = ArrayVec::new();

    for n in adjacent(point) {
        let chain = board.chain_at(n);
        if chain == own {
            own_touched = true;
        } else if chain != NO_CHAIN && board.is_live(chain) && !done.contains(&chain) {
            done.push(chain);
            decrease_liberty(board, chain, captured);
        }
    }

    if own_touched {
        decrease_liberty(board, own, captured);
    }
}

fn decrease_liberty(board: &mut Board, chain: ChainId, captured: &mut Vec<Point>) {
    if board.decrement_liberties(chain) > 0 {
        return;
    }

    board.remove_chain(chain);
    let removed = board.last_removed().to_vec();
    for &p in &removed {
        increase_liberties_of_adjacent_chains(board, p);
    }
    captured.extend(removed);
}

/// Whether the stone just applied at `point` is still on the board with a liberty.
/// A lone stone with no liberty stays on the board at zero, while a connected one takes its
/// whole chain off through the capture path.
pub fn placement_survived(board: &Board, point: Point) -> bool {
    !board.is_vacant(point) && board.liberties_of(board.chain_at(point)) > 0
}

/// A freed point is one new liberty for each distinct chain around it.
fn increase_liberties_of_adjacent_chains(board: &mut Board, point: Point) {
    let mut done: ArrayVec<ChainId, 4> = ArrayVec::new();
    for n in adjacent(point) {
        let chain = board.chain_at(n);
        if chain != NO_CHAIN && !done.contains(&chain) {
            done.push(chain);
            board.increment_liberties(chain);
        }
    }
}
