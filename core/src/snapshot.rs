use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Empty,
    Pipe {
        kind: PieceKind,
        rotation: Rotation,
        wet: bool,
    },
}

impl CellView {
    pub fn from_piece(piece: Option<&Piece>) -> Self {
        match piece {
            None => Self::Empty,
            Some(piece) => Self::Pipe {
                kind: piece.kind(),
                rotation: piece.rotation(),
                wet: piece.is_wet(),
            },
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Empty
    }
}

/// Read-only copy of a session for renderers and serialisation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub start: Coord2,
    pub end: Coord2,
    pub cells: Array2<CellView>,
    pub supply: Vec<CellView>,
    pub outcome: Outcome,
    pub leak: Option<Coord2>,
    pub countdown: u16,
    pub stats: SessionStats,
}

impl Snapshot {
    pub fn from_session<S: PieceSource>(session: &GameSession<S>) -> Self {
        let board = session.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Empty);

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                cells[coords.to_nd_index()] = CellView::from_piece(board.piece_at(coords));
            }
        }

        Self {
            size,
            start: board.start(),
            end: board.end(),
            cells,
            supply: session
                .supply()
                .iter()
                .map(|piece| CellView::from_piece(Some(piece)))
                .collect(),
            outcome: session.outcome(),
            leak: session.leak(),
            countdown: session.countdown_remaining(),
            stats: session.stats(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        if in_bounds(coords, self.size) {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }
}
