use std::fmt;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    NotOnBoard,
    Occupied,
    Suicide,
    Superko,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "game over"),
            MoveError::NotOnBoard => write!(f, "position outside of board"),
            MoveError::Occupied => write!(f, "already a stone at that position"),
            MoveError::Suicide => write!(f, "no liberty at that position"),
            MoveError::Superko => write!(f, "positional superko"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDimensions { cols: u8, rows: u8 },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { cols, rows } => {
                write!(f, "invalid board dimensions {cols}x{rows}")
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidDimensions { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
