use crate::*;

/// Checks whether `piece` may go on `board` at `coords` without changing anything.
///
/// The target must be an empty cell on the board, and at least one of the piece's openings
/// must meet an already placed, non-end piece that opens straight back at it.
pub fn check_placement(
    board: &Board,
    piece: &Piece,
    coords: Coord2,
) -> core::result::Result<(), PlacementRejection> {
    if !board.contains(coords) {
        return Err(PlacementRejection::OutOfBounds);
    }
    if board.is_occupied(coords) {
        return Err(PlacementRejection::Occupied);
    }

    let candidate = Piece::placed(piece.kind(), piece.rotation(), coords);
    let anchored = candidate
        .exits()
        .into_iter()
        .filter_map(|exit| board.piece_at(exit))
        .any(|neighbor| {
            neighbor.kind() != PieceKind::End && geometry::mutually_connected(&candidate, neighbor)
        });

    if anchored {
        Ok(())
    } else {
        Err(PlacementRejection::NotConnected)
    }
}

pub fn can_place(board: &Board, piece: &Piece, coords: Coord2) -> bool {
    check_placement(board, piece, coords).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new((12, 8), (0, 1), (10, 6)).unwrap()
    }

    fn straight(rotation: Rotation) -> Piece {
        Piece::new(PieceKind::Straight).with_rotation(rotation)
    }

    #[test]
    fn horizontal_straight_joins_the_start() {
        let board = board();
        assert!(can_place(&board, &straight(0), (1, 1)));
        assert!(can_place(&board, &straight(2), (1, 1)));
    }

    #[test]
    fn vertical_straight_next_to_start_is_rejected() {
        let board = board();
        assert_eq!(
            check_placement(&board, &straight(1), (1, 1)),
            Err(PlacementRejection::NotConnected)
        );
    }

    #[test]
    fn occupied_and_off_board_targets_are_rejected() {
        let board = board();
        assert_eq!(
            check_placement(&board, &straight(0), (0, 1)),
            Err(PlacementRejection::Occupied)
        );
        assert_eq!(
            check_placement(&board, &straight(0), (12, 1)),
            Err(PlacementRejection::OutOfBounds)
        );
        assert_eq!(
            check_placement(&board, &straight(0), (-1, 0)),
            Err(PlacementRejection::OutOfBounds)
        );
    }

    #[test]
    fn isolated_cell_is_rejected() {
        let board = board();
        let four_way = Piece::new(PieceKind::FourWay);
        assert!(!can_place(&board, &four_way, (5, 4)));
    }

    #[test]
    fn neighbor_must_point_back() {
        let curve = |rotation| Piece::new(PieceKind::Curved).with_rotation(rotation);

        // Opens {up, right}: nothing faces the straight on its left.
        let mut away = board();
        away.put(curve(1), (3, 4)).unwrap();
        assert_eq!(
            check_placement(&away, &straight(0), (2, 4)),
            Err(PlacementRejection::NotConnected)
        );

        // Opens {left, up}: the left opening meets the straight.
        let mut toward = board();
        toward.put(curve(0), (3, 4)).unwrap();
        assert!(can_place(&toward, &straight(0), (2, 4)));
    }

    #[test]
    fn four_way_beside_a_straight_pointing_away_does_not_count() {
        let mut board = board();
        board.put(straight(0), (1, 1)).unwrap();
        board.put(straight(0), (2, 1)).unwrap();
        assert!(!can_place(&board, &Piece::new(PieceKind::FourWay), (2, 2)));
        assert!(can_place(&board, &Piece::new(PieceKind::FourWay), (3, 1)));
    }

    #[test]
    fn end_piece_cannot_anchor_a_placement() {
        let board = board();
        // Would connect to the end's left opening.
        assert!(!can_place(&board, &straight(0), (9, 6)));
    }

    #[test]
    fn validation_has_no_side_effects() {
        let board = board();
        let snapshot = board.clone();
        let _ = can_place(&board, &straight(0), (1, 1));
        let _ = can_place(&board, &straight(1), (1, 1));
        assert_eq!(board, snapshot);
    }
}
