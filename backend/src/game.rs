use common::messages::{Scores, StateResponse};
use common::{GameState, InvalidMove, PlayerNum, Status};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub type SharedTable = Arc<Mutex<Table>>;

/// What to do with a move that arrives after the game has been won or drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TerminalMovePolicy {
    // Quietly start a new game and play the move in it
    AutoReset,
    // Leave the finished game on the board and reject the move
    Reject,
}

/// The one game served by this process, plus the win tally that outlives
/// individual games.
#[derive(Debug)]
pub struct Table {
    game_state: GameState,
    scores: Scores,
    policy: TerminalMovePolicy,
}

impl Table {
    pub fn new(policy: TerminalMovePolicy) -> Self {
        Table {
            game_state: GameState::new(),
            scores: Scores::default(),
            policy,
        }
    }

    pub fn shared(self) -> SharedTable {
        Arc::new(Mutex::new(self))
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    #[tracing::instrument(skip(self))]
    pub fn play(&mut self, column: i32) -> Result<StateResponse, InvalidMove> {
        if self.game_state.is_terminal() && self.policy == TerminalMovePolicy::AutoReset {
            info!(
                "Game ended with {}, starting a new one",
                self.game_state.status()
            );
            self.game_state.reset();
        }
        let status = self.game_state.play_move(column).map_err(|err| {
            warn!("Rejected move: {}", err);
            err
        })?;
        match status {
            Status::Win(PlayerNum::P1) => self.scores.player1 += 1,
            Status::Win(PlayerNum::P2) => self.scores.player2 += 1,
            _ => {}
        }
        if status.is_terminal() {
            info!("Game over: {}", status);
        }
        Ok(self.state())
    }

    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) -> StateResponse {
        self.game_state.reset();
        info!("Game reset");
        self.state()
    }

    pub fn state(&self) -> StateResponse {
        StateResponse {
            game: self.game_state().view(),
            scores: self.scores(),
        }
    }
}
