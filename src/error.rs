//! Error types.
//!
//! Construction and legality failures are reported synchronously at the
//! offending call. Nothing is retried or corrected internally.

use thiserror::Error;

use crate::color::Color;

/// Why a move was refused. The board is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("point not empty")]
    Occupied,
    /// The move would recreate the position from before the previous move.
    #[error("repeats the previous position")]
    Repetition,
    #[error("point fully surrounded without capture")]
    Surrounded,
    #[error("suicide")]
    Suicide,
}

/// Failure to build a territory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerritoryError {
    #[error("vertex list cannot be empty")]
    NoVertices,
    #[error("vertex ({0}, {1}) is outside the grid")]
    OutOfBounds(usize, usize),
    #[error("vertices are of different colors")]
    MixedColors,
    #[error("walls cannot form a territory")]
    WallVertex,
    #[error("vertices are not all connected")]
    Incoherent,
    #[error("expected at least 2 territories to merge, got {0}")]
    NotEnoughTerritories(usize),
    #[error("territories are not on the same grid")]
    DifferentGrids,
    #[error("cannot explore a territory from a wall at ({0}, {1})")]
    WallSeed(usize, usize),
}

/// Every failure the board can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board size {height}x{width}")]
    InvalidSize { height: usize, width: usize },
    #[error("grid rows have different lengths")]
    RaggedGrid,
    #[error("unknown cell symbol {0:?}")]
    UnknownSymbol(char),
    #[error("unknown color value {0}")]
    UnknownColorValue(i8),
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("{0} is not a player color")]
    NotPlayerColor(Color),
    #[error("illegal move at ({x}, {y}): {reason}")]
    Illegal { x: usize, y: usize, reason: IllegalMove },
    #[error("{color} cannot skip, {expected} is to move")]
    NotYourTurn { color: Color, expected: Color },
    #[error("no players are joined")]
    NoPlayers,
    #[error("{0} is not joined to this board")]
    PlayerNotJoined(Color),
    #[error("color {0} is already used")]
    ColorTaken(Color),
    #[error("board is already full")]
    BoardFull,
    #[error("the board needs at least two players to run, got {0}")]
    NotEnoughPlayers(usize),
    #[error("the {0} player is not available on this board")]
    PlayerUnavailable(Color),
    #[error(transparent)]
    Territory(#[from] TerritoryError),
}
