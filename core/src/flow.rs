use alloc::vec;
use alloc::vec::Vec;
use core::mem;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    Idle,
    Advancing,
    Won,
    Lost,
}

impl FlowState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Outcome {
        match self {
            Self::Idle | Self::Advancing => Outcome::InProgress,
            Self::Won => Outcome::Won,
            Self::Lost => Outcome::Lost,
        }
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::Idle
    }
}

/// What one call to [`FlowEngine::advance`] did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStep {
    pub state: FlowState,
    /// Cell the water escaped into, set only on the call that lost the game.
    pub leak: Option<Coord2>,
    /// Pieces that became wet during this call, in the order they were reached.
    pub wetted: Vec<Coord2>,
}

impl FlowStep {
    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }
}

/// Where water heading out of one opening ends up.
enum Spill {
    Reached,
    Wetted,
    Passed,
    Leaked,
}

/// Breadth-first water front, moved forward one generation per call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEngine {
    state: FlowState,
    frontier: Vec<Coord2>,
    leak: Option<Coord2>,
    generations: Saturating<CellCount>,
}

impl FlowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Wet pieces whose openings get checked on the next call.
    pub fn frontier(&self) -> &[Coord2] {
        &self.frontier
    }

    pub fn leak(&self) -> Option<Coord2> {
        self.leak
    }

    /// Number of calls that moved the water.
    pub fn generations(&self) -> CellCount {
        self.generations.0
    }

    /// Moves the water one generation forward.
    ///
    /// The first call only soaks the start piece. Each later call expands every piece in the
    /// current frontier exactly once; pieces soaked during the call wait for the next one.
    /// The first leak or arrival at the end finishes the flow and nothing else is examined.
    pub fn advance(&mut self, board: &mut Board) -> FlowStep {
        match self.state {
            FlowState::Won | FlowState::Lost => return self.step(Vec::new()),
            FlowState::Idle => {
                let start = board.start();
                board.soak(start);
                self.frontier = vec![start];
                self.state = FlowState::Advancing;
                self.generations += 1;
                log::trace!("Water released at {:?}", start);
                return self.step(vec![start]);
            }
            FlowState::Advancing => {}
        }

        self.generations += 1;
        let mut wetted = Vec::new();

        'frontier: for coords in mem::take(&mut self.frontier) {
            let Some(current) = board.piece_at(coords).copied() else {
                continue;
            };
            for exit in current.exits() {
                match spill(board, &current, exit) {
                    Spill::Reached => {
                        wetted.push(exit);
                        self.finish(FlowState::Won, None);
                        break 'frontier;
                    }
                    Spill::Leaked => {
                        self.finish(FlowState::Lost, Some(exit));
                        break 'frontier;
                    }
                    Spill::Wetted => wetted.push(exit),
                    Spill::Passed => {}
                }
            }
        }

        if !self.state.is_finished() {
            if wetted.is_empty() {
                log::debug!("Water is trapped, no dry piece left to reach");
                self.finish(FlowState::Lost, None);
            } else {
                log::trace!(
                    "Generation {} wetted {:?}",
                    self.generations.0,
                    wetted.as_slice()
                );
                self.frontier.clone_from(&wetted);
            }
        }

        self.step(wetted)
    }

    fn finish(&mut self, state: FlowState, leak: Option<Coord2>) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        self.leak = leak;
        self.frontier.clear();
        match (state, leak) {
            (FlowState::Won, _) => log::info!("Water reached the end"),
            (_, Some(coords)) => log::info!("Water leaked at {:?}", coords),
            _ => log::info!("Water stopped short of the end"),
        }
    }

    fn step(&self, wetted: Vec<Coord2>) -> FlowStep {
        FlowStep {
            state: self.state,
            leak: self.leak,
            wetted,
        }
    }
}

fn spill(board: &mut Board, from: &Piece, exit: Coord2) -> Spill {
    if exit == board.end() {
        board.soak(exit);
        return Spill::Reached;
    }

    // covers both off-board openings and empty cells
    let Some(next) = board.piece_at(exit).copied() else {
        return Spill::Leaked;
    };

    if next.is_wet() {
        Spill::Passed
    } else if geometry::mutually_connected(from, &next) {
        board.soak(exit);
        Spill::Wetted
    } else {
        Spill::Leaked
    }
}
