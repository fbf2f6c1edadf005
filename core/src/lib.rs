#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use flow::*;
pub use geometry::{Exits, mutually_connected};
pub use piece::*;
pub use placement::*;
pub use session::*;
pub use snapshot::*;
pub use supply::*;
pub use types::*;

mod board;
mod error;
mod flow;
pub mod geometry;
mod piece;
mod placement;
mod session;
mod snapshot;
mod supply;
mod types;

/// How long the player gets before the water is released, and how fast it runs after.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Countdown ticks before the first flow tick.
    pub const fn countdown_ticks(self) -> u16 {
        match self {
            Self::Easy => 40,
            Self::Medium => 25,
            Self::Hard => 15,
        }
    }

    /// Suggested delay between flow ticks for the scheduler.
    pub const fn flow_interval_ms(self) -> u32 {
        match self {
            Self::Easy => 2000,
            Self::Medium => 1500,
            Self::Hard => 1000,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub start: Coord2,
    pub end: Coord2,
    pub supply_capacity: usize,
    pub weights: PieceWeights,
    pub seed: u64,
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (12, 8);
    pub const DEFAULT_SUPPLY_CAPACITY: usize = 4;

    /// Board of `size` with the start near the top-left and the end near the bottom-right.
    pub fn with_size(size: Coord2) -> Self {
        Self {
            size,
            start: (0, 1),
            end: (size.0.saturating_sub(2), size.1.saturating_sub(2)),
            ..Default::default()
        }
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        board::validate_layout(self.size, self.start, self.end)?;
        if self.supply_capacity == 0 {
            return Err(ConfigError::ZeroSupplyCapacity.into());
        }
        self.weights.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let (width, height) = Self::DEFAULT_SIZE;
        Self {
            size: Self::DEFAULT_SIZE,
            start: (0, 1),
            end: (width - 2, height - 2),
            supply_capacity: Self::DEFAULT_SUPPLY_CAPACITY,
            weights: PieceWeights::default(),
            seed: 0,
            difficulty: Difficulty::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTick {
    Running(u16),
    Expired,
}
