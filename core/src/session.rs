use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a flow tick produced, ready for the renderer and the notification sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub outcome: Outcome,
    pub leak: Option<Coord2>,
    pub wetted: Vec<Coord2>,
}

impl From<FlowStep> for TickReport {
    fn from(step: FlowStep) -> Self {
        Self {
            outcome: step.outcome(),
            leak: step.leak,
            wetted: step.wetted,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub pieces_placed: CellCount,
    pub pieces_wet: CellCount,
    pub generations: CellCount,
}

/// A single game: owns the board, the supply, and the water.
///
/// Every operation runs to completion. Once the game is won or lost the session is frozen and
/// every mutating call is turned down with [`GameError::SessionTerminal`].
#[derive(Clone, Debug)]
pub struct GameSession<S = RandomPieceSource> {
    config: GameConfig,
    board: Board,
    supply: PieceSupply<S>,
    flow: FlowEngine,
    countdown: u16,
    pieces_placed: Saturating<CellCount>,
}

impl GameSession<RandomPieceSource> {
    pub fn new(config: GameConfig) -> Result<Self> {
        let source = RandomPieceSource::new(config.seed, config.weights);
        Self::with_source(config, source)
    }
}

impl<S: PieceSource> GameSession<S> {
    pub fn with_source(config: GameConfig, source: S) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.size, config.start, config.end)?;
        log::debug!(
            "New {:?} game on {:?} board, start {:?}, end {:?}",
            config.difficulty,
            config.size,
            config.start,
            config.end
        );
        Ok(Self {
            board,
            supply: PieceSupply::new(config.supply_capacity, source),
            flow: FlowEngine::new(),
            countdown: config.difficulty.countdown_ticks(),
            pieces_placed: Saturating(0),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn supply(&self) -> &[Piece] {
        self.supply.pieces()
    }

    pub fn outcome(&self) -> Outcome {
        self.flow.state().outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.flow.is_finished()
    }

    pub fn flow_state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn leak(&self) -> Option<Coord2> {
        self.flow.leak()
    }

    pub fn countdown_remaining(&self) -> u16 {
        self.countdown
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            pieces_placed: self.pieces_placed.0,
            pieces_wet: self.board.wet_count(),
            generations: self.flow.generations(),
        }
    }

    /// Whether the supply piece at `supply_index` could go to `coords` right now.
    pub fn check_placement(&self, supply_index: usize, coords: Coord2) -> Result<()> {
        self.check_active()?;
        let piece = self.supply.get(supply_index)?;
        placement::check_placement(&self.board, piece, coords)?;
        Ok(())
    }

    pub fn place_piece(&mut self, supply_index: usize, coords: Coord2) -> Result<()> {
        if let Err(err) = self.check_placement(supply_index, coords) {
            log::debug!("Rejected slot {} at {:?}: {}", supply_index, coords, err);
            return Err(err);
        }

        let piece = self.supply.take(supply_index)?;
        self.board.put(piece, coords)?;
        self.pieces_placed += 1;
        log::debug!("Placed {:?} at {:?}", piece.kind(), coords);
        Ok(())
    }

    pub fn rotate_supply_piece(&mut self, supply_index: usize) -> Result<()> {
        self.check_active()?;
        self.supply.rotate(supply_index)
    }

    /// Moves the water one generation. Does nothing once the game is decided.
    pub fn tick(&mut self) -> TickReport {
        self.flow.advance(&mut self.board).into()
    }

    /// Counts down towards the release of the water. Stays expired once it gets there.
    pub fn countdown_tick(&mut self) -> Result<CountdownTick> {
        self.check_active()?;
        self.countdown = self.countdown.saturating_sub(1);
        Ok(match self.countdown {
            0 => CountdownTick::Expired,
            remaining => CountdownTick::Running(remaining),
        })
    }

    fn check_active(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::SessionTerminal)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn session(kinds: &[PieceKind]) -> GameSession<ScriptedPieceSource> {
        GameSession::with_source(
            GameConfig::default(),
            ScriptedPieceSource::new(kinds.iter().copied()),
        )
        .unwrap()
    }

    fn kinds(session: &GameSession<ScriptedPieceSource>) -> Vec<PieceKind> {
        session.supply().iter().map(Piece::kind).collect()
    }

    #[test]
    fn new_session_is_in_progress() {
        let session = GameSession::new(GameConfig::default().with_seed(7)).unwrap();

        assert_eq!(session.outcome(), Outcome::InProgress);
        assert!(session.flow_state().is_idle());
        assert_eq!(session.config().seed, 7);
        assert_eq!(session.supply().len(), 4);
        assert_eq!(session.board().pieces().count(), 2);
        assert_eq!(session.countdown_remaining(), 25);
        assert_eq!(session.stats(), SessionStats::default());
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = GameConfig {
            start: (3, 3),
            end: (3, 3),
            ..Default::default()
        };
        assert_eq!(
            GameSession::new(config).err(),
            Some(GameError::InvalidConfig(ConfigError::StartEqualsEnd))
        );
    }

    #[test]
    fn accepted_placement_moves_piece_and_refills_supply() {
        let mut session = session(&[
            PieceKind::Curved,
            PieceKind::Straight,
            PieceKind::FourWay,
            PieceKind::Curved,
            PieceKind::FourWay,
        ]);

        session.place_piece(1, (1, 1)).unwrap();

        let placed = session.board().piece_at((1, 1)).unwrap();
        assert_eq!(placed.kind(), PieceKind::Straight);
        assert_eq!(placed.position(), Some((1, 1)));
        assert_eq!(
            kinds(&session),
            vec![
                PieceKind::Curved,
                PieceKind::FourWay,
                PieceKind::Curved,
                PieceKind::FourWay,
            ]
        );
        assert_eq!(session.stats().pieces_placed, 1);
    }

    #[test]
    fn rejected_placement_changes_nothing() {
        let mut session = session(&[PieceKind::Straight]);
        session.rotate_supply_piece(0).unwrap();
        let board = session.board().clone();
        let supply = session.supply().to_vec();

        assert_eq!(
            session.place_piece(0, (1, 1)),
            Err(GameError::InvalidPlacement(PlacementRejection::NotConnected))
        );
        assert_eq!(
            session.place_piece(0, (0, 1)),
            Err(GameError::InvalidPlacement(PlacementRejection::Occupied))
        );
        assert_eq!(
            session.place_piece(7, (1, 1)),
            Err(GameError::InvalidSupplyIndex(7))
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.supply(), supply.as_slice());
    }

    #[test]
    fn rotation_makes_a_piece_fit() {
        let mut session = session(&[PieceKind::Straight]);

        session.rotate_supply_piece(0).unwrap();
        assert!(session.check_placement(0, (1, 1)).is_err());

        session.rotate_supply_piece(0).unwrap();
        assert_eq!(session.check_placement(0, (1, 1)), Ok(()));
        session.place_piece(0, (1, 1)).unwrap();
        assert_eq!(session.board().piece_at((1, 1)).unwrap().rotation(), 2);
    }

    #[test]
    fn rotating_a_missing_slot_is_an_error() {
        let mut session = session(&[PieceKind::Curved]);
        assert_eq!(
            session.rotate_supply_piece(4),
            Err(GameError::InvalidSupplyIndex(4))
        );
    }

    #[test]
    fn finished_session_is_frozen() {
        let mut session = session(&[PieceKind::Straight]);
        session.tick();
        let lost = session.tick();
        assert_eq!(lost.outcome, Outcome::Lost);
        assert_eq!(lost.leak, Some((1, 1)));

        let board = session.board().clone();
        let supply = session.supply().to_vec();

        for _ in 0..3 {
            assert_eq!(
                session.place_piece(0, (1, 1)),
                Err(GameError::SessionTerminal)
            );
            assert_eq!(
                session.rotate_supply_piece(0),
                Err(GameError::SessionTerminal)
            );
            assert_eq!(session.countdown_tick(), Err(GameError::SessionTerminal));
            let report = session.tick();
            assert_eq!(report.outcome, Outcome::Lost);
            assert_eq!(report.leak, Some((1, 1)));
            assert!(report.wetted.is_empty());
        }

        assert_eq!(session.outcome(), Outcome::Lost);
        assert_eq!(session.board(), &board);
        assert_eq!(session.supply(), supply.as_slice());
    }

    #[test]
    fn countdown_expires_and_stays_expired() {
        let config = GameConfig::default().with_difficulty(Difficulty::Hard);
        let mut session =
            GameSession::with_source(config, ScriptedPieceSource::new([PieceKind::Curved]))
                .unwrap();

        for remaining in (1..15).rev() {
            assert_eq!(session.countdown_tick(), Ok(CountdownTick::Running(remaining)));
        }
        assert_eq!(session.countdown_tick(), Ok(CountdownTick::Expired));
        assert_eq!(session.countdown_tick(), Ok(CountdownTick::Expired));
        assert_eq!(session.countdown_remaining(), 0);
    }

    #[test]
    fn stats_follow_the_game() {
        let mut session = session(&[PieceKind::Straight]);
        session.place_piece(0, (1, 1)).unwrap();
        session.place_piece(0, (2, 1)).unwrap();

        session.tick();
        session.tick();

        assert_eq!(
            session.stats(),
            SessionStats {
                pieces_placed: 2,
                pieces_wet: 2,
                generations: 2,
            }
        );
    }
}
