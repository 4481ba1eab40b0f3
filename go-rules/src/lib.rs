pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod scoring;
pub mod stone;
pub mod turn;
pub mod zobrist;

/// `(x, y)` with `x` the column. Signed so callers can ask about points just off the edge.
pub type Point = (i16, i16);

pub use board::{Board, ChainId, NO_CHAIN};
pub use config::{EngineConfig, MAX_BOARD_SIZE};
pub use engine::{Engine, GameState, Placement, Stage};
pub use error::{ConfigError, MoveError};
pub use scoring::{PlayerPoints, Score};
pub use stone::Stone;
pub use turn::Turn;
pub use zobrist::ZobristTable;
