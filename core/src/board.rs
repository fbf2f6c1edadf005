use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells, each holding at most one piece.
///
/// Start and end are laid down on construction; every other cell can be filled once and is
/// never cleared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Option<Piece>>,
    start: Coord2,
    end: Coord2,
}

impl Board {
    pub fn new(size: Coord2, start: Coord2, end: Coord2) -> Result<Self> {
        validate_layout(size, start, end)?;

        let mut cells: Array2<Option<Piece>> = Array2::default(size.to_nd_index());
        cells[start.to_nd_index()] = Some(Piece::placed(PieceKind::Start, 0, start));
        cells[end.to_nd_index()] = Some(Piece::placed(PieceKind::End, 0, end));

        Ok(Self { cells, start, end })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    /// The piece at `coords`, or `None` for empty and off-board cells.
    pub fn piece_at(&self, coords: Coord2) -> Option<&Piece> {
        if self.contains(coords) {
            self.cells[coords.to_nd_index()].as_ref()
        } else {
            None
        }
    }

    pub fn is_occupied(&self, coords: Coord2) -> bool {
        self.piece_at(coords).is_some()
    }

    /// Every placed piece in column-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().filter_map(Option::as_ref)
    }

    pub fn wet_count(&self) -> CellCount {
        self.pieces()
            .filter(|piece| piece.is_wet())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub(crate) fn put(&mut self, mut piece: Piece, coords: Coord2) -> Result<()> {
        if !self.contains(coords) {
            return Err(PlacementRejection::OutOfBounds.into());
        }
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_some() {
            return Err(PlacementRejection::Occupied.into());
        }
        piece.set_position(coords);
        *cell = Some(piece);
        Ok(())
    }

    /// Marks the piece at `coords` wet. Returns `false` when there is nothing dry to soak.
    pub(crate) fn soak(&mut self, coords: Coord2) -> bool {
        if !self.contains(coords) {
            return false;
        }
        match &mut self.cells[coords.to_nd_index()] {
            Some(piece) if !piece.is_wet() => {
                piece.soak();
                true
            }
            _ => false,
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Option<Piece>;

    /// Panics when `coords` is off the board, like any other array index.
    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

pub(crate) fn validate_layout(size: Coord2, start: Coord2, end: Coord2) -> Result<()> {
    use ConfigError::*;

    if size.0 < 2 || size.1 < 2 {
        return Err(BoardTooSmall.into());
    }
    if !in_bounds(start, size) {
        return Err(StartOutOfBounds.into());
    }
    if !in_bounds(end, size) {
        return Err(EndOutOfBounds.into());
    }
    if start == end {
        return Err(StartEqualsEnd.into());
    }
    let start_opens = geometry::exits(PieceKind::Start, 0, start);
    let end_opens = geometry::exits(PieceKind::End, 0, end);
    if start_opens
        .iter()
        .chain(end_opens.iter())
        .any(|&exit| !in_bounds(exit, size))
    {
        return Err(ExitOffBoard.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new((12, 8), (0, 1), (10, 6)).unwrap()
    }

    #[test]
    fn new_board_holds_only_start_and_end() {
        let board = board();

        assert_eq!(board.size(), (12, 8));
        assert_eq!(board.pieces().count(), 2);
        assert_eq!(board.piece_at((0, 1)).map(Piece::kind), Some(PieceKind::Start));
        assert_eq!(board.piece_at((10, 6)).map(Piece::kind), Some(PieceKind::End));
        assert_eq!(board.piece_at((10, 6)).and_then(Piece::position), Some((10, 6)));
        assert!(!board.is_occupied((5, 5)));
    }

    #[test]
    fn off_board_lookups_are_empty() {
        let board = board();
        assert_eq!(board.piece_at((-1, 1)), None);
        assert_eq!(board.piece_at((12, 0)), None);
    }

    #[test]
    fn put_assigns_position_and_is_permanent() {
        let mut board = board();

        board.put(Piece::new(PieceKind::Straight), (1, 1)).unwrap();
        assert_eq!(board[(1, 1)].and_then(|p| p.position()), Some((1, 1)));

        assert_eq!(
            board.put(Piece::new(PieceKind::Curved), (1, 1)),
            Err(GameError::InvalidPlacement(PlacementRejection::Occupied))
        );
        assert_eq!(
            board.put(Piece::new(PieceKind::Curved), (0, 1)),
            Err(GameError::InvalidPlacement(PlacementRejection::Occupied))
        );
        assert_eq!(board[(1, 1)].map(|p| p.kind()), Some(PieceKind::Straight));
    }

    #[test]
    fn soak_only_changes_dry_pieces() {
        let mut board = board();

        assert!(board.soak((0, 1)));
        assert!(!board.soak((0, 1)));
        assert!(!board.soak((3, 3)));
        assert!(!board.soak((-1, 0)));
        assert_eq!(board.wet_count(), 1);
    }

    #[test]
    fn layout_validation() {
        use ConfigError::*;

        let check = |size, start, end| match Board::new(size, start, end) {
            Ok(_) => None,
            Err(GameError::InvalidConfig(reason)) => Some(reason),
            Err(other) => panic!("unexpected error {other:?}"),
        };

        assert_eq!(check((1, 8), (0, 1), (3, 1)), Some(BoardTooSmall));
        assert_eq!(check((12, 8), (12, 1), (3, 1)), Some(StartOutOfBounds));
        assert_eq!(check((12, 8), (0, 1), (3, 8)), Some(EndOutOfBounds));
        assert_eq!(check((12, 8), (4, 4), (4, 4)), Some(StartEqualsEnd));
        assert_eq!(check((12, 8), (11, 1), (3, 1)), Some(ExitOffBoard));
        assert_eq!(check((12, 8), (0, 1), (0, 4)), Some(ExitOffBoard));
        assert_eq!(check((12, 8), (0, 1), (10, 6)), None);
    }
}
