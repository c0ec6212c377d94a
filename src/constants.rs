//! Defaults shared by the library and the command line.

/// Side of a standard Go board.
pub const DEFAULT_SIZE: usize = 19;

/// Turn budget of a game loop unless configured otherwise. Random players
/// rarely pass on their own, so an unbounded loop may run for a long time.
pub const DEFAULT_MAX_TURNS: usize = 1000;

/// Seats around a board, one per player color.
pub const MAX_PLAYERS: usize = 8;
