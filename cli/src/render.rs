use pipeflow_core::{CellView, Coord2, Outcome, PieceKind, Snapshot};

pub fn glyph(view: CellView) -> char {
    let CellView::Pipe {
        kind,
        rotation,
        wet,
    } = view
    else {
        return '·';
    };

    let (dry, soaked) = match (kind, rotation) {
        (PieceKind::Start, _) => ('s', 'S'),
        (PieceKind::End, _) => ('e', 'E'),
        (PieceKind::FourWay, _) => ('┼', '╋'),
        (PieceKind::Straight, r) if r % 2 == 0 => ('─', '━'),
        (PieceKind::Straight, _) => ('│', '┃'),
        (PieceKind::Curved, 0) => ('┘', '┛'),
        (PieceKind::Curved, 1) => ('└', '┗'),
        (PieceKind::Curved, 2) => ('┌', '┏'),
        (PieceKind::Curved, _) => ('┐', '┓'),
    };
    if wet { soaked } else { dry }
}

pub fn board(snapshot: &Snapshot) -> String {
    let (width, height) = snapshot.size;
    let mut out = String::from("   ");
    for x in 0..width {
        out.push_str(&format!("{}", x % 10));
    }
    out.push('\n');

    for y in 0..height {
        out.push_str(&format!("{y:>2} "));
        for x in 0..width {
            let coords: Coord2 = (x, y);
            if snapshot.leak == Some(coords) {
                out.push('!');
            } else {
                out.push(snapshot.cell(coords).map_or(' ', glyph));
            }
        }
        out.push('\n');
    }

    out.push_str("supply:");
    for (slot, view) in snapshot.supply.iter().enumerate() {
        out.push_str(&format!(" {slot}:{}", glyph(*view)));
    }
    out.push('\n');
    out
}

pub fn outcome(snapshot: &Snapshot) -> Option<String> {
    if !snapshot.outcome.is_finished() {
        return None;
    }
    match (snapshot.outcome, snapshot.leak) {
        (Outcome::Won, _) => Some(format!(
            "The water made it! {} pieces placed.",
            snapshot.stats.pieces_placed
        )),
        (Outcome::Lost, Some((x, y))) => Some(format!("Leak at column {x}, row {y}. Game over.")),
        (Outcome::Lost, None) => Some("The water is trapped. Game over.".to_owned()),
        (Outcome::InProgress, _) => None,
    }
}
