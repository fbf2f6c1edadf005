use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Draws supply pieces from a seeded RNG according to [`PieceWeights`].
#[derive(Clone, Debug)]
pub struct RandomPieceSource {
    rng: SmallRng,
    weights: PieceWeights,
}

impl RandomPieceSource {
    pub fn new(seed: u64, weights: PieceWeights) -> Self {
        if weights.total() == 0 {
            log::warn!("All piece weights are zero, every piece will be a four-way");
        }
        Self {
            rng: SmallRng::seed_from_u64(seed),
            weights,
        }
    }
}

impl PieceSource for RandomPieceSource {
    fn next_piece(&mut self) -> Piece {
        let total = self.weights.total();
        let roll = if total == 0 {
            0
        } else {
            self.rng.random_range(0..total)
        };
        Piece::new(self.weights.pick(roll))
    }
}
