//! gogame: a Go-like board game engine.
//!
//! Boards can be any size, rectangular or shaped with walls, and seat up to
//! eight players. The engine keeps every connected region of same-colored
//! points ("territory") and its liberties up to date after each move, checks
//! legality (occupied points, suicide, full surround, immediate repetition)
//! and resolves captures.
//!
//! ## Modules
//!
//! - [`color`] - Cell states and player colors
//! - [`grid`] - The 2D array of cells and adjacency
//! - [`territory`] - Connected regions and their liberties
//! - [`board`] - Legality, moves, captures, scoring and turns
//! - [`player`] - The decision-maker trait and a few players
//! - [`game`] - The game loop
//! - [`error`] - Error types
//! - [`constants`] - Defaults
//!
//! ## Example
//!
//! ```
//! use gogame::board::Board;
//! use gogame::color::Color;
//!
//! let mut board = Board::new(5).unwrap();
//! board.play(0, 0, Color::Black).unwrap();
//! assert_eq!(board[(0, 0)], Color::Black);
//! assert_eq!(board.territories(Some(Color::Empty)).next().unwrap().size(), 24);
//! ```

pub mod board;
pub mod color;
pub mod constants;
pub mod error;
pub mod game;
pub mod grid;
pub mod player;
pub mod territory;
