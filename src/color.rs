//! Cell states.
//!
//! Every point of the grid holds exactly one [`Color`]: it is either out of
//! play ([`Color::Wall`]), free ([`Color::Empty`]) or occupied by one of the
//! player colors. The declaration order doubles as the rotation order of the
//! players, so the derived `Ord` is meaningful.

use std::fmt;

use crate::constants::MAX_PLAYERS;
use crate::error::BoardError;

/// State of a single grid point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// Permanently unplayable point, never owned by a territory.
    Wall,
    Empty,
    Black,
    White,
    Green,
    Blue,
    Yellow,
    Purple,
    Pink,
    Orange,
}

/// All colors a player can hold, in rotation order.
pub const PLAYER_COLORS: [Color; MAX_PLAYERS] = [
    Color::Black,
    Color::White,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Purple,
    Color::Pink,
    Color::Orange,
];

impl Color {
    /// Check if a color belongs to a player rather than being a special value.
    #[inline]
    pub fn is_player(self) -> bool {
        !matches!(self, Color::Wall | Color::Empty)
    }

    /// Numeric value: -1 for walls, 0 for empty points, 1.. for players.
    pub fn value(self) -> i8 {
        match self {
            Color::Wall => -1,
            Color::Empty => 0,
            Color::Black => 1,
            Color::White => 2,
            Color::Green => 3,
            Color::Blue => 4,
            Color::Yellow => 5,
            Color::Purple => 6,
            Color::Pink => 7,
            Color::Orange => 8,
        }
    }

    /// Single character used by the text rendering of a grid.
    pub fn symbol(self) -> char {
        match self {
            Color::Wall => '#',
            Color::Empty => '.',
            Color::Black => 'X',
            Color::White => 'O',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Yellow => 'y',
            Color::Purple => 'p',
            Color::Pink => 'k',
            Color::Orange => 'o',
        }
    }

    /// Inverse of [`Color::symbol`].
    pub fn from_symbol(c: char) -> Option<Color> {
        let color = match c {
            '#' => Color::Wall,
            '.' => Color::Empty,
            'X' => Color::Black,
            'O' => Color::White,
            'g' => Color::Green,
            'b' => Color::Blue,
            'y' => Color::Yellow,
            'p' => Color::Purple,
            'k' => Color::Pink,
            'o' => Color::Orange,
            _ => return None,
        };
        Some(color)
    }
}

impl TryFrom<i8> for Color {
    type Error = BoardError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Color::Wall),
            0 => Ok(Color::Empty),
            1..=8 => Ok(PLAYER_COLORS[(value - 1) as usize]),
            _ => Err(BoardError::UnknownColorValue(value)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
