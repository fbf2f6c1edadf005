//! Where each pipe opens, derived from kind, rotation, and position only.

use smallvec::SmallVec;

use crate::*;

/// Neighbouring coordinates a piece opens into. Never more than four.
pub type Exits = SmallVec<[Coord2; 4]>;

use Direction::*;

const START: &[Direction] = &[Right];
const END: &[Direction] = &[Left];
const HORIZONTAL: &[Direction] = &[Left, Right];
const VERTICAL: &[Direction] = &[Up, Down];
const CURVES: [&[Direction]; 4] = [&[Left, Up], &[Up, Right], &[Right, Down], &[Down, Left]];
const FOUR_WAY: &[Direction] = &[Up, Right, Down, Left];

/// Directions a piece of `kind` opens towards, in the order the flow visits them.
pub const fn openings(kind: PieceKind, rotation: Rotation) -> &'static [Direction] {
    match kind {
        PieceKind::Start => START,
        PieceKind::End => END,
        PieceKind::FourWay => FOUR_WAY,
        PieceKind::Straight => match rotation % 2 {
            0 => HORIZONTAL,
            _ => VERTICAL,
        },
        PieceKind::Curved => CURVES[(rotation % 4) as usize],
    }
}

/// Cells a piece of `kind` placed at `position` connects to. Not clipped to any board.
pub fn exits(kind: PieceKind, rotation: Rotation, position: Coord2) -> Exits {
    openings(kind, rotation)
        .iter()
        .map(|dir| dir.step(position))
        .collect()
}

/// Both pieces open into each other. Unplaced pieces never connect.
pub fn mutually_connected(a: &Piece, b: &Piece) -> bool {
    let (Some(a_pos), Some(b_pos)) = (a.position(), b.position()) else {
        return false;
    };
    a.exits_at(a_pos).contains(&b_pos) && b.exits_at(b_pos).contains(&a_pos)
}
