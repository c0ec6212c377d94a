//! Turn-by-turn game loop.
//!
//! The loop asks the player to move for a decision, applies it with
//! [`Board::play`] or [`Board::skip`], and stops when two turns in a row leave
//! the board unchanged or when a [`GameLimits`] budget runs out.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::color::Color;
use crate::constants::DEFAULT_MAX_TURNS;
use crate::error::BoardError;
use crate::player::Move;

/// Budgets enforced by [`run_game`]. `None` disables a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLimits {
    pub max_turns: Option<usize>,
    pub max_duration: Option<Duration>,
}

impl Default for GameLimits {
    fn default() -> Self {
        Self {
            max_turns: Some(DEFAULT_MAX_TURNS),
            max_duration: None,
        }
    }
}

impl GameLimits {
    /// No limit at all: the game only ends when the players stop changing the board.
    pub fn unbounded() -> Self {
        Self {
            max_turns: None,
            max_duration: None,
        }
    }
}

/// Play a game between the joined players and return the winning color.
///
/// # Errors
/// - fewer than two players joined
/// - a player chose an illegal or off-board move (the game is aborted)
pub fn run_game(board: &mut Board, limits: &GameLimits) -> Result<Color, BoardError> {
    let count = board.player_count();
    if count < 2 {
        return Err(BoardError::NotEnoughPlayers(count));
    }
    if limits.max_turns.is_none() && limits.max_duration.is_none() {
        warn!("no turn or time limit, the game might run forever");
    }

    let start = Instant::now();
    let mut turns = 0;
    while limits.max_turns.is_none_or(|max| turns < max)
        && limits.max_duration.is_none_or(|max| start.elapsed() < max)
    {
        let color = board.current_player().ok_or(BoardError::NoPlayers)?;
        let mut player = board.take_player(color)?;
        let decision = player.play(board);
        board.return_player(color, player);
        debug!(turn = turns, %color, %decision, "player decided");

        match decision {
            Move::Pass => {
                if board.skip(color)? {
                    let winner = board.winner()?;
                    info!(turns, %winner, "game over");
                    return Ok(winner);
                }
            }
            Move::Place(x, y) => board.play(x, y, color)?,
        }
        turns += 1;
    }

    let winner = board.winner()?;
    info!(turns, %winner, "game stopped by its limits");
    Ok(winner)
}
