use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Anything that can hand out fresh, unplaced pieces for the supply.
pub trait PieceSource {
    fn next_piece(&mut self) -> Piece;
}

/// Relative odds of each supply piece kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceWeights {
    pub curved: u32,
    pub straight: u32,
    pub four_way: u32,
}

impl PieceWeights {
    pub const fn new(curved: u32, straight: u32, four_way: u32) -> Self {
        Self {
            curved,
            straight,
            four_way,
        }
    }

    pub const fn total(&self) -> u64 {
        self.curved as u64 + self.straight as u64 + self.four_way as u64
    }

    pub fn validate(&self) -> Result<()> {
        if self.total() == 0 {
            Err(ConfigError::EmptyWeights.into())
        } else {
            Ok(())
        }
    }

    /// Maps a roll in `0..total()` onto a kind.
    pub(crate) fn pick(&self, roll: u64) -> PieceKind {
        let curved = self.curved as u64;
        let straight = curved + self.straight as u64;
        if roll < curved {
            PieceKind::Curved
        } else if roll < straight {
            PieceKind::Straight
        } else {
            PieceKind::FourWay
        }
    }
}

impl Default for PieceWeights {
    fn default() -> Self {
        Self::new(55, 30, 15)
    }
}

/// Bounded FIFO of pieces waiting to be placed, topped up from a [`PieceSource`].
#[derive(Clone, Debug)]
pub struct PieceSupply<S> {
    pieces: Vec<Piece>,
    source: S,
}

impl<S: PieceSource> PieceSupply<S> {
    pub fn new(capacity: usize, mut source: S) -> Self {
        let pieces = (0..capacity).map(|_| source.next_piece()).collect();
        Self { pieces, source }
    }

    pub fn capacity(&self) -> usize {
        self.pieces.len()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, index: usize) -> Result<&Piece> {
        self.pieces
            .get(index)
            .ok_or(GameError::InvalidSupplyIndex(index))
    }

    pub fn rotate(&mut self, index: usize) -> Result<()> {
        self.pieces
            .get_mut(index)
            .ok_or(GameError::InvalidSupplyIndex(index))?
            .rotate()
    }

    /// Removes the piece at `index` and appends a fresh one at the back.
    pub(crate) fn take(&mut self, index: usize) -> Result<Piece> {
        if index >= self.pieces.len() {
            return Err(GameError::InvalidSupplyIndex(index));
        }
        let piece = self.pieces.remove(index);
        self.pieces.push(self.source.next_piece());
        Ok(piece)
    }
}
