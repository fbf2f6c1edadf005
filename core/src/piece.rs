use serde::{Deserialize, Serialize};

use crate::*;

/// Quarter-turns clockwise from the canonical orientation, always in `0..4`.
pub type Rotation = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Start,
    Straight,
    Curved,
    FourWay,
    End,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        Self::Start,
        Self::Straight,
        Self::Curved,
        Self::FourWay,
        Self::End,
    ];

    /// Only straight and curved pipes change shape when turned.
    pub const fn is_rotatable(self) -> bool {
        matches!(self, Self::Straight | Self::Curved)
    }

    /// Start and end are fixed by the board and never come from the supply.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// One pipe segment, either waiting in the supply or placed on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    position: Option<Coord2>,
    wet: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            position: None,
            wet: false,
        }
    }

    /// Rotation is normalised, and dropped entirely for kinds that cannot turn.
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = if self.kind.is_rotatable() {
            rotation % 4
        } else {
            0
        };
        self
    }

    pub const fn placed(kind: PieceKind, rotation: Rotation, position: Coord2) -> Self {
        let mut piece = Self::new(kind).with_rotation(rotation);
        piece.position = Some(position);
        piece
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub const fn position(&self) -> Option<Coord2> {
        self.position
    }

    pub const fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub const fn is_wet(&self) -> bool {
        self.wet
    }

    /// Turns an unplaced piece a quarter clockwise.
    pub fn rotate(&mut self) -> Result<()> {
        if self.is_placed() {
            return Err(GameError::PiecePlaced);
        }
        if self.kind.is_rotatable() {
            self.rotation = (self.rotation + 1) % 4;
        }
        Ok(())
    }

    /// Openings of this piece on the board, empty while it is still in the supply.
    pub fn exits(&self) -> Exits {
        match self.position {
            Some(position) => self.exits_at(position),
            None => Exits::new(),
        }
    }

    /// Openings this piece would have if it sat at `position`.
    pub fn exits_at(&self, position: Coord2) -> Exits {
        geometry::exits(self.kind, self.rotation, position)
    }

    pub(crate) fn set_position(&mut self, position: Coord2) {
        self.position = Some(position);
    }

    pub(crate) fn soak(&mut self) {
        self.wet = true;
    }
}
