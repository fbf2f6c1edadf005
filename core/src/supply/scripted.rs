use alloc::vec::Vec;

use super::*;

/// Hands out a fixed list of kinds in order, starting over when it runs out.
///
/// Useful for replaying a known game and for tests that need a predictable supply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedPieceSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedPieceSource {
    /// Start and end kinds are skipped, an empty script yields straights.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds = kinds
            .into_iter()
            .filter(|kind| !kind.is_terminal())
            .collect();
        Self { kinds, next: 0 }
    }
}

impl PieceSource for ScriptedPieceSource {
    fn next_piece(&mut self) -> Piece {
        let Some(&kind) = self.kinds.get(self.next) else {
            return Piece::new(PieceKind::Straight);
        };
        self.next = (self.next + 1) % self.kinds.len();
        Piece::new(kind)
    }
}
