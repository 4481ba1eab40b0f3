use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Point;
use crate::board::{Board, ChainId};
use crate::config::EngineConfig;
use crate::error::{ConfigError, MoveError};
use crate::rules;
use crate::scoring::{self, Score};
use crate::stone::Stone;
use crate::turn::Turn;
use crate::zobrist::ZobristTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    InProgress,
    GameOver,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::InProgress => write!(f, "in_progress"),
            Stage::GameOver => write!(f, "game_over"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Stage::InProgress),
            "game_over" => Ok(Stage::GameOver),
            _ => Err(format!("unknown stage: {s}")),
        }
    }
}

/// Read-only snapshot of everything a front end renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Vec<i8>,
    pub cols: u8,
    pub rows: u8,
    pub current_player: Stone,
    pub stage: Stage,
    pub consecutive_passes: u8,
    pub score: Score,
    pub message: String,
}

/// What a committed placement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub stone: Stone,
    pub point: Point,
    pub chain: ChainId,
    /// Liberties of the stone's chain after the move.
    pub liberties: u32,
    pub captured: Vec<Point>,
}

/// Result of a successful speculative apply, not yet committed.
struct Speculation {
    captured: Vec<Point>,
    hash: u64,
}

/// The rule engine: turn order, legality, superko memory and scoring.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    scratch: Board,
    zobrist: ZobristTable,
    position_hash: u64,
    seen_positions: HashSet<u64>,
    current: Stone,
    consecutive_passes: u8,
    stage: Stage,
    score: Score,
    message: String,
    moves: Vec<Turn>,
}

impl Engine {
    pub fn new(cols: u8, rows: u8) -> Self {
        if let Err(e) = EngineConfig::with_dimensions(cols, rows).validate() {
            panic!("{e}");
        }
        let zobrist = ZobristTable::new(cols as usize * rows as usize);
        Self::create(cols, rows, zobrist)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cells = config.cols as usize * config.rows as usize;
        let zobrist = match config.seed {
            Some(seed) => ZobristTable::with_seed(cells, seed),
            None => ZobristTable::new(cells),
        };
        Ok(Self::create(config.cols, config.rows, zobrist))
    }

    fn create(cols: u8, rows: u8, zobrist: ZobristTable) -> Self {
        let board = Board::with_dimensions(cols, rows);
        Engine {
            scratch: board.clone(),
            board,
            zobrist,
            position_hash: 0,
            seen_positions: HashSet::new(),
            current: Stone::Black,
            consecutive_passes: 0,
            stage: Stage::InProgress,
            score: Score::default(),
            message: to_play_message(Stone::Black),
            moves: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn cols(&self) -> u8 {
        self.board.cols()
    }

    pub fn rows(&self) -> u8 {
        self.board.rows()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Stone {
        self.current
    }

    /// Stone at a point, `None` for empty or off-board points.
    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.board.on_board(point) {
            self.board.stone_at(point)
        } else {
            None
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_game_over(&self) -> bool {
        self.stage == Stage::GameOver
    }

    /// Final score; all zero until the game is over.
    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn score_black(&self) -> u32 {
        self.score.get(Stone::Black).total()
    }

    pub fn score_white(&self) -> u32 {
        self.score.get(Stone::White).total()
    }

    pub fn status_message(&self) -> &str {
        &self.message
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    /// Hash of the current position.
    pub fn position_hash(&self) -> u64 {
        self.position_hash
    }

    // -- Game actions --

    /// Place a stone for the current player. On failure the board is untouched and the status
    /// message carries the reason.
    pub fn try_play(&mut self, point: Point) -> Result<Placement, MoveError> {
        let stone = self.current;
        let mut scratch = std::mem::take(&mut self.scratch);

        let speculation = match self.speculate(point, &mut scratch) {
            Ok(s) => s,
            Err(e) => {
                self.scratch = scratch;
                debug!(?point, %stone, reason = %e, "rejected move");
                self.message = match e {
                    MoveError::GameOver => self.game_over_message(),
                    e => format!("Can't add the stone: {e}"),
                };
                return Err(e);
            }
        };

        // Commit: the scratch board becomes the live one.
        self.scratch = std::mem::replace(&mut self.board, scratch);
        self.position_hash = speculation.hash;
        self.seen_positions.insert(speculation.hash);
        self.consecutive_passes = 0;
        self.moves.push(Turn::Play { stone, point });
        self.current = stone.opp();
        self.message = to_play_message(self.current);

        let chain = self.board.chain_at(point);
        let placement = Placement {
            stone,
            point,
            chain,
            liberties: self.board.liberties_of(chain),
            captured: speculation.captured,
        };
        debug!(
            ?point,
            %stone,
            chain,
            liberties = placement.liberties,
            captured = placement.captured.len(),
            "placed stone"
        );
        Ok(placement)
    }

    /// UI command: place a stone for the current player, reporting success.
    pub fn attempt_place_stone(&mut self, point: Point) -> bool {
        self.try_play(point).is_ok()
    }

    /// Whether the current player may play at `point`, superko included. Nothing is mutated.
    pub fn is_legal(&self, point: Point) -> bool {
        let mut scratch = Board::default();
        self.speculate(point, &mut scratch).is_ok()
    }

    /// Run the whole move on `scratch`, leaving the live board alone.
    fn speculate(&self, point: Point, scratch: &mut Board) -> Result<Speculation, MoveError> {
        if self.stage == Stage::GameOver {
            return Err(MoveError::GameOver);
        }
        let stone = self.current;
        let chain = rules::check_placement(&self.board, point, stone)?;

        scratch.clone_from(&self.board);
        let captured = rules::apply_placement(scratch, point, stone, chain);
        if !rules::placement_survived(scratch, point) {
            return Err(MoveError::Suicide);
        }

        let mut hash = self.position_hash ^ self.zobrist.key(scratch.index(point), stone);
        for &p in &captured {
            hash ^= self.zobrist.key(scratch.index(p), stone.opp());
        }
        debug_assert_eq!(hash, self.zobrist.hash(scratch));

        if self.seen_positions.contains(&hash) {
            return Err(MoveError::Superko);
        }

        Ok(Speculation { captured, hash })
    }

    /// Pass the turn. Two passes in a row end the game and score it.
    pub fn pass(&mut self) {
        if self.stage == Stage::GameOver {
            self.message = self.game_over_message();
            return;
        }

        let stone = self.current;
        self.consecutive_passes += 1;
        self.moves.push(Turn::Pass { stone });
        debug!(%stone, passes = self.consecutive_passes, "pass");

        if self.consecutive_passes >= 2 {
            self.finish();
        } else {
            self.current = stone.opp();
            self.message = format!("{stone} passed, {} to play", self.current);
        }
    }

    fn finish(&mut self) {
        self.score = scoring::score(&self.board);
        self.stage = Stage::GameOver;
        self.message = self.game_over_message();
        info!(
            black = self.score_black(),
            white = self.score_white(),
            result = %self.score.result(),
            "game over"
        );
    }

    /// Start a new game on the same board size. The hash keys are kept.
    pub fn reset(&mut self) {
        self.board.reset();
        self.scratch.reset();
        self.position_hash = 0;
        self.seen_positions.clear();
        self.current = Stone::Black;
        self.consecutive_passes = 0;
        self.stage = Stage::InProgress;
        self.score = Score::default();
        self.message = to_play_message(Stone::Black);
        self.moves.clear();
        info!(cols = self.cols(), rows = self.rows(), "new game");
    }

    fn game_over_message(&self) -> String {
        format!("Game over: {}", self.score.result())
    }

    // -- Serialization --

    pub fn game_state(&self) -> GameState {
        GameState {
            board: self.board.cells().to_vec(),
            cols: self.cols(),
            rows: self.rows(),
            current_player: self.current,
            stage: self.stage,
            consecutive_passes: self.consecutive_passes,
            score: self.score,
            message: self.message.clone(),
        }
    }
}

fn to_play_message(stone: Stone) -> String {
    format!("{stone} to play")
}
