//! Decision makers.
//!
//! The board never looks inside a player: it hands out a color when the
//! player joins, asks for a [`Move`] when its turn comes, and notifies it when
//! it leaves. Anything implementing [`Player`] can sit at the board.

use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::board::Board;
use crate::color::Color;

/// What a player decided to do on its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    /// Put a stone at `(x, y)`.
    Place(usize, usize),
    Pass,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected `pass` or two coordinates, got {0:?}")]
pub struct ParseMoveError(String);

/// Parse `pass`, `x y` or `x,y`.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [x, y] => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => Ok(Move::Place(x, y)),
                _ => Err(ParseMoveError(s.to_string())),
            },
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(x, y) => write!(f, "({x}, {y})"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// A participant in a game.
pub trait Player {
    /// Name used in logs and results.
    fn name(&self) -> &str;

    /// Color asked for when joining. `None` takes the next free color.
    fn preferred_color(&self) -> Option<Color> {
        None
    }

    /// Called once the player joined `board` with `color`.
    fn initiate(&mut self, color: Color, board: &Board);

    /// Called when the player is removed from its board.
    fn clear(&mut self);

    /// Decide the next move. The board is read-only here.
    fn play(&mut self, board: &Board) -> Move;
}

/// Plays a uniformly random legal move, or passes when there is none.
pub struct RandomPlayer {
    name: String,
    color: Option<Color>,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic player for reproducible games.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            ..Self::new(name)
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn initiate(&mut self, color: Color, _board: &Board) {
        self.color = Some(color);
    }

    fn clear(&mut self) {
        self.color = None;
    }

    fn play(&mut self, board: &Board) -> Move {
        let Some(color) = self.color else {
            warn!(player = %self.name, "asked to play without a color");
            return Move::Pass;
        };
        let moves = board.playable_moves(color);
        if moves.is_empty() {
            return Move::Pass;
        }
        let (x, y) = moves[self.rng.usize(..moves.len())];
        Move::Place(x, y)
    }
}

/// Always plays the first legal move in `(x, y)` order.
pub struct FirstMovePlayer {
    name: String,
    color: Option<Color>,
}

impl FirstMovePlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

impl Player for FirstMovePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn initiate(&mut self, color: Color, _board: &Board) {
        self.color = Some(color);
    }

    fn clear(&mut self) {
        self.color = None;
    }

    fn play(&mut self, board: &Board) -> Move {
        self.color
            .and_then(|c| board.playable_moves(c).first().copied())
            .map_or(Move::Pass, |(x, y)| Move::Place(x, y))
    }
}

/// Replays a fixed list of moves, then passes forever.
pub struct ScriptedPlayer {
    name: String,
    color: Option<Color>,
    preferred: Option<Color>,
    moves: VecDeque<Move>,
}

impl ScriptedPlayer {
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            name: name.into(),
            color: None,
            preferred: None,
            moves: moves.into_iter().collect(),
        }
    }

    /// Ask for a specific color when joining.
    pub fn with_color(mut self, color: Color) -> Self {
        self.preferred = Some(color);
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Moves not played yet.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn preferred_color(&self) -> Option<Color> {
        self.preferred
    }

    fn initiate(&mut self, color: Color, _board: &Board) {
        self.color = Some(color);
    }

    fn clear(&mut self) {
        self.color = None;
    }

    fn play(&mut self, _board: &Board) -> Move {
        self.moves.pop_front().unwrap_or(Move::Pass)
    }
}

/// Reads moves from a line-based input, prompting on an output.
///
/// Unparsable or illegal input is reported and asked again. End of input
/// counts as a pass.
pub struct InteractivePlayer<R, W> {
    name: String,
    color: Option<Color>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractivePlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            color: None,
            input,
            output,
        }
    }

    fn read_move(&mut self, board: &Board, color: Color) -> std::io::Result<Move> {
        loop {
            write!(self.output, "{} ({color}) > ", self.name)?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Move::Pass);
            }
            match line.parse::<Move>() {
                Ok(Move::Place(x, y)) => {
                    if let Err(e) = board.check_move(x, y, color) {
                        writeln!(self.output, "{e}")?;
                        continue;
                    }
                    return Ok(Move::Place(x, y));
                }
                Ok(Move::Pass) => return Ok(Move::Pass),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for InteractivePlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn initiate(&mut self, color: Color, _board: &Board) {
        self.color = Some(color);
    }

    fn clear(&mut self) {
        self.color = None;
    }

    fn play(&mut self, board: &Board) -> Move {
        let Some(color) = self.color else {
            return Move::Pass;
        };
        if let Err(e) = writeln!(self.output, "{board}") {
            warn!(error = %e, "cannot display the board");
        }
        self.read_move(board, color).unwrap_or_else(|e| {
            warn!(error = %e, "input failed, passing");
            Move::Pass
        })
    }
}
