use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid placement: {0}")]
    InvalidPlacement(PlacementRejection),
    #[error("No piece in supply slot {0}")]
    InvalidSupplyIndex(usize),
    #[error("Game already ended, no new moves are accepted")]
    SessionTerminal,
    #[error("Placed pieces cannot be rotated")]
    PiecePlaced,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(ConfigError),
}

/// Why a placement request was turned down.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("target cell is outside the board")]
    OutOfBounds,
    #[error("target cell is already occupied")]
    Occupied,
    #[error("no neighbouring pipe connects to the piece")]
    NotConnected,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 2x2")]
    BoardTooSmall,
    #[error("start cell is outside the board")]
    StartOutOfBounds,
    #[error("end cell is outside the board")]
    EndOutOfBounds,
    #[error("start and end share a cell")]
    StartEqualsEnd,
    #[error("start or end opening points off the board")]
    ExitOffBoard,
    #[error("supply capacity must be positive")]
    ZeroSupplyCapacity,
    #[error("piece weights must not all be zero")]
    EmptyWeights,
}

impl From<PlacementRejection> for GameError {
    fn from(reason: PlacementRejection) -> Self {
        Self::InvalidPlacement(reason)
    }
}

impl From<ConfigError> for GameError {
    fn from(reason: ConfigError) -> Self {
        Self::InvalidConfig(reason)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
