//! The game director: owns the state and the RNG, and turns one input
//! snapshot into one rendered frame.

use rand::Rng;

use crate::compute::{init_state, tick};
use crate::entities::{GameState, GameStatus};
use crate::input::InputSnapshot;
use crate::render::{frame, Frame};

pub struct Director<R: Rng> {
    state: GameState,
    rng: R,
}

impl<R: Rng> Director<R> {
    pub fn new(initial_score: i64, rng: R) -> Self {
        Director::from_state(init_state(initial_score), rng)
    }

    /// Start from an arbitrary state (tests, replays).
    pub fn from_state(state: GameState, rng: R) -> Self {
        Director { state, rng }
    }

    /// Run one tick and describe the result.
    ///
    /// Once the game has ended the state no longer changes; the returned
    /// frame keeps showing the final overlay.
    pub fn step(&mut self, input: &InputSnapshot) -> Frame {
        self.state = tick(&self.state, input, &mut self.rng);
        frame(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Playing
    }
}
