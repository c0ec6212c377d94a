//! The game board: grid, territories, legality, captures and turns.
//!
//! [`Board`] owns the [`Grid`] and the full list of [`Territory`] values,
//! which always partition every non-wall point of the grid. All mutation goes
//! through [`Board::play`] and [`Board::skip`]; a move is either rejected
//! before anything changes or applied completely.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Index;

use tracing::{debug, info, warn};

use crate::color::{Color, PLAYER_COLORS};
use crate::constants::MAX_PLAYERS;
use crate::error::{BoardError, IllegalMove};
use crate::grid::{Grid, Point};
use crate::player::Player;
use crate::territory::Territory;

/// A board with its players.
pub struct Board {
    grid: Grid,
    /// Grid as it was before the last completed turn.
    last_grid: Grid,
    territories: Vec<Territory>,
    prisoners: BTreeMap<Color, usize>,
    /// Joined players by color. A seat is `None` while its player is deciding
    /// a move, and on cloned boards.
    players: BTreeMap<Color, Option<Box<dyn Player>>>,
    current: Option<Color>,
}

impl Board {
    /// Square board of `size` x `size` empty points.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_size(size, size)
    }

    /// Board of `height` rows and `width` columns.
    pub fn with_size(height: usize, width: usize) -> Result<Self, BoardError> {
        Ok(Self::from_grid(Grid::new(height, width)?))
    }

    /// Board whose playable area is the ellipse inscribed in the
    /// `height` x `width` rectangle. Points outside are walls.
    pub fn circular(height: usize, width: usize) -> Result<Self, BoardError> {
        let mut grid = Grid::new(height, width)?;
        let mid_x = height as f64 / 2.0;
        let mid_y = width as f64 / 2.0;
        for (x, y) in grid.points() {
            let dx = (x as f64 - mid_x + 0.5) / mid_x;
            let dy = (y as f64 - mid_y + 0.5) / mid_y;
            if dx * dx + dy * dy > 1.0 {
                grid.set((x, y), Color::Wall);
            }
        }
        Ok(Self::from_grid(grid))
    }

    /// Board from a pre-filled grid. Territories are derived from scratch.
    pub fn from_grid(grid: Grid) -> Self {
        let last_grid = Grid::filled(grid.height(), grid.width(), Color::Empty);
        let mut territories: Vec<Territory> = Vec::new();
        let mut covered = BTreeSet::new();
        for p in grid.points() {
            if grid[p] == Color::Wall || covered.contains(&p) {
                continue;
            }
            let t = Territory::explored(&grid, p);
            covered.extend(t.vertices().iter().copied());
            territories.push(t);
        }
        Self {
            grid,
            last_grid,
            territories,
            prisoners: BTreeMap::new(),
            players: BTreeMap::new(),
            current: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snapshot used by the repetition guard.
    pub fn last_grid(&self) -> &Grid {
        &self.last_grid
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Cell state at `(x, y)`, `None` when off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.grid.get((x, y))
    }

    /// Orthogonal neighbors of `(x, y)`.
    pub fn around(&self, x: usize, y: usize) -> std::vec::IntoIter<Point> {
        self.grid.around(x, y)
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Color to move, if any player joined.
    pub fn current_player(&self) -> Option<Color> {
        self.current
    }

    /// Joined colors in rotation order.
    pub fn players(&self) -> impl Iterator<Item = Color> + '_ {
        self.players.keys().copied()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player seated at `color`, unless it is busy deciding a move or
    /// this board is a clone.
    pub fn player(&self, color: Color) -> Option<&dyn Player> {
        self.players.get(&color)?.as_deref()
    }

    /// Player following `reference` (default: the one to move), rotating
    /// through joined colors in ascending order.
    pub fn next_player(&self, reference: Option<Color>) -> Result<Color, BoardError> {
        if self.players.is_empty() {
            return Err(BoardError::NoPlayers);
        }
        let reference = reference.or(self.current).ok_or(BoardError::NoPlayers)?;
        let colors: Vec<Color> = self.players.keys().copied().collect();
        let i = colors
            .iter()
            .position(|&c| c == reference)
            .ok_or(BoardError::PlayerNotJoined(reference))?;
        Ok(colors[(i + 1) % colors.len()])
    }

    /// Seat a player. It gets its preferred color, or the first free one.
    /// The first player to join moves first.
    pub fn join(&mut self, mut player: Box<dyn Player>) -> Result<Color, BoardError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(BoardError::BoardFull);
        }
        let color = match player.preferred_color() {
            Some(c) if !c.is_player() => return Err(BoardError::NotPlayerColor(c)),
            Some(c) if self.players.contains_key(&c) => return Err(BoardError::ColorTaken(c)),
            Some(c) => c,
            None => PLAYER_COLORS
                .into_iter()
                .find(|c| !self.players.contains_key(c))
                .ok_or(BoardError::BoardFull)?,
        };
        if self.players.is_empty() {
            self.current = Some(color);
        }
        player.initiate(color, self);
        info!(player = player.name(), %color, "player joined");
        self.players.insert(color, Some(player));
        Ok(color)
    }

    /// Unseat the player of `color` and hand it back.
    pub fn remove_player(&mut self, color: Color) -> Result<Option<Box<dyn Player>>, BoardError> {
        let mut player = self
            .players
            .remove(&color)
            .ok_or(BoardError::PlayerNotJoined(color))?;
        if self.current == Some(color) {
            self.current = self.players.keys().next().copied();
        }
        if let Some(p) = player.as_mut() {
            p.clear();
            info!(player = p.name(), %color, "player removed");
        }
        Ok(player)
    }

    /// Unseat every player.
    pub fn clear_players(&mut self) {
        for p in self.players.values_mut().flatten() {
            p.clear();
        }
        self.players.clear();
        self.current = None;
    }

    pub(crate) fn take_player(&mut self, color: Color) -> Result<Box<dyn Player>, BoardError> {
        self.players
            .get_mut(&color)
            .ok_or(BoardError::PlayerNotJoined(color))?
            .take()
            .ok_or(BoardError::PlayerUnavailable(color))
    }

    pub(crate) fn return_player(&mut self, color: Color, player: Box<dyn Player>) {
        if let Some(seat) = self.players.get_mut(&color) {
            *seat = Some(player);
        }
    }

    fn advance_turn(&mut self) {
        if let Ok(next) = self.next_player(None) {
            self.current = Some(next);
        }
    }

    fn verify_color_before_playing(&self, color: Color) -> Result<(), BoardError> {
        if !color.is_player() {
            return Err(BoardError::NotPlayerColor(color));
        }
        if !self.players.is_empty() {
            if !self.players.contains_key(&color) {
                warn!(%color, "not the color of a joined player");
            }
            if self.current != Some(color) {
                warn!(%color, expected = ?self.current, "playing out of turn");
            }
        }
        Ok(())
    }

    // =========================================================================
    // Territories
    // =========================================================================

    /// Territories on the board, optionally only those of `color`.
    pub fn territories(&self, color: Option<Color>) -> impl Iterator<Item = &Territory> {
        self.territories
            .iter()
            .filter(move |t| color.is_none_or(|c| t.color() == c))
    }

    /// The territory owning `(x, y)`; `None` for walls and off-board points.
    pub fn get_territory(&self, x: usize, y: usize) -> Option<&Territory> {
        self.territories.iter().find(|t| t.includes(x, y, None))
    }

    /// Points currently holding `color`, row by row.
    pub fn vertices(&self, color: Color) -> Vec<Point> {
        self.grid.points().filter(|&p| self.grid[p] == color).collect()
    }

    /// The grid as numeric color values.
    pub fn matrix(&self) -> Vec<Vec<i8>> {
        self.grid.values()
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Check whether `color` may play at `(x, y)`, and why not.
    pub fn check_move(&self, x: usize, y: usize, color: Color) -> Result<(), BoardError> {
        if !color.is_player() {
            return Err(BoardError::NotPlayerColor(color));
        }
        let point = (x, y);
        let illegal = |reason| Err(BoardError::Illegal { x, y, reason });
        match self.grid.get(point) {
            None => return Err(BoardError::OutOfBounds { x, y }),
            Some(Color::Empty) => {}
            Some(_) => return illegal(IllegalMove::Occupied),
        }

        let placed = Some((point, color));
        let mut mine: Vec<&Territory> = Vec::new();
        let mut opponent: Vec<&Territory> = Vec::new();
        let mut surrounded = true;
        for (i, j) in self.grid.around(x, y) {
            // Walls have no territory and never count for either side.
            let Some(t) = self.get_territory(i, j) else {
                continue;
            };
            let side = match t.color() {
                Color::Empty => {
                    surrounded = false;
                    continue;
                }
                c if c == color => {
                    surrounded = false;
                    &mut mine
                }
                _ => &mut opponent,
            };
            if !side.iter().any(|&s| std::ptr::eq(s, t)) {
                side.push(t);
            }
        }
        let captured: Vec<&Territory> = opponent
            .iter()
            .copied()
            .filter(|t| t.hypothetical_freedom(&self.grid, placed).is_empty())
            .collect();

        if self.simulate(point, color, &captured) == self.last_grid && self.grid != self.last_grid {
            return illegal(IllegalMove::Repetition);
        }
        if !captured.is_empty() {
            return Ok(());
        }
        if surrounded {
            return illegal(IllegalMove::Surrounded);
        }
        if !mine.is_empty()
            && mine
                .iter()
                .all(|t| t.hypothetical_freedom(&self.grid, placed).is_empty())
        {
            return illegal(IllegalMove::Suicide);
        }
        Ok(())
    }

    /// True if `color` may play at `(x, y)`.
    pub fn is_playable(&self, x: usize, y: usize, color: Color) -> bool {
        self.check_move(x, y, color).is_ok()
    }

    /// Every point where `color` may play, in `(x, y)` order.
    pub fn playable_moves(&self, color: Color) -> Vec<Point> {
        let mut moves: Vec<Point> = self
            .territories(Some(Color::Empty))
            .flat_map(|t| t.vertices().iter().copied())
            .filter(|&(x, y)| self.is_playable(x, y, color))
            .collect();
        moves.sort_unstable();
        moves
    }

    /// Grid after `color` plays at `point` and `captured` is removed.
    fn simulate(&self, point: Point, color: Color, captured: &[&Territory]) -> Grid {
        let mut grid = self.grid.clone();
        grid.set(point, color);
        for &p in captured.iter().flat_map(|t| t.vertices()) {
            grid.set(p, Color::Empty);
        }
        grid
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Play a stone of `color` at `(x, y)`.
    ///
    /// Playing out of turn, or with a color that did not join, only logs a
    /// warning so positions can be set up by hand.
    pub fn play(&mut self, x: usize, y: usize, color: Color) -> Result<(), BoardError> {
        self.verify_color_before_playing(color)?;
        self.check_move(x, y, color)?;
        let point = (x, y);

        self.last_grid = self.grid.clone();
        self.grid.set(point, color);
        if !self.players.is_empty() {
            self.advance_turn();
        }

        let touching: Vec<usize> = self
            .territories
            .iter()
            .enumerate()
            .filter(|(_, t)| t.color() == color && t.is_touching(&self.grid, x, y))
            .map(|(i, _)| i)
            .collect();
        if touching.len() >= 2 {
            let parts: Vec<&Territory> = touching.iter().map(|&i| &self.territories[i]).collect();
            let merged = Territory::joined(&self.grid, &parts, point);
            debug!(%color, parts = touching.len(), size = merged.size(), "territories merged");
            for &i in touching.iter().rev() {
                self.territories.remove(i);
            }
            self.territories.push(merged);
        }

        let host = self
            .territories
            .iter()
            .position(|t| t.color() == Color::Empty && t.includes(x, y, None));
        for t in &mut self.territories {
            t.update(&self.grid, point, color);
        }
        if let Some(i) = host {
            self.split_territory(i);
        }
        self.territories.retain(|t| !t.is_empty());

        self.capture(color);

        if !self.territories.iter().any(|t| t.includes(x, y, Some(color))) {
            self.territories.push(Territory::explored(&self.grid, point));
        }
        debug!(%color, x, y, "stone played");
        Ok(())
    }

    /// Replace territory `i` by its connected components.
    fn split_territory(&mut self, i: usize) {
        let t = self.territories.swap_remove(i);
        let color = t.color();
        let parts = t.split(&self.grid);
        if parts.len() > 1 {
            debug!(%color, parts = parts.len(), "territory split");
        }
        self.territories.extend(parts);
    }

    /// Remove every territory of another player left without liberties and
    /// credit its stones to `color`.
    fn capture(&mut self, color: Color) {
        let (captured, kept): (Vec<Territory>, Vec<Territory>) = std::mem::take(&mut self.territories)
            .into_iter()
            .partition(|t| t.color().is_player() && t.color() != color && t.freedom().is_empty());
        self.territories = kept;
        if captured.is_empty() {
            return;
        }

        let freed: Vec<Point> = captured
            .iter()
            .flat_map(|t| t.vertices().iter().copied())
            .collect();
        for t in &captured {
            debug!(captor = %color, captured = %t.color(), size = t.size(), "territory captured");
        }
        *self.prisoners.entry(color).or_insert(0) += freed.len();

        for &p in &freed {
            self.grid.set(p, Color::Empty);
        }
        for &p in &freed {
            for t in &mut self.territories {
                t.update(&self.grid, p, Color::Empty);
            }
        }
        for &(x, y) in &freed {
            if !self.territories.iter().any(|t| t.includes(x, y, None)) {
                self.territories.push(Territory::explored(&self.grid, (x, y)));
            }
        }
    }

    /// Pass the turn. Returns `true` when the game is over: nothing changed
    /// since the previous turn and there are stones on the board.
    pub fn skip(&mut self, color: Color) -> Result<bool, BoardError> {
        if !color.is_player() {
            return Err(BoardError::NotPlayerColor(color));
        }
        if let Some(expected) = self.current.filter(|_| !self.players.is_empty()) {
            if expected != color {
                return Err(BoardError::NotYourTurn { color, expected });
            }
        }
        if self.grid == self.last_grid && self.grid.has_stones() {
            info!(%color, "second pass in a row, game over");
            return Ok(true);
        }
        if !self.players.is_empty() {
            self.advance_turn();
        }
        self.last_grid = self.grid.clone();
        debug!(%color, "turn skipped");
        Ok(false)
    }

    // =========================================================================
    // Scoring
    // =========================================================================

    /// Stones captured by `color` so far.
    pub fn prisoners(&self, color: Color) -> usize {
        self.prisoners.get(&color).copied().unwrap_or(0)
    }

    /// Area score: prisoners plus stones on the board.
    pub fn score(&self, color: Color) -> usize {
        self.prisoners(color) + self.grid.count(color)
    }

    /// Joined color with the highest score. Ties go to the last color in
    /// rotation order.
    pub fn winner(&self) -> Result<Color, BoardError> {
        let mut best: Option<(Color, usize)> = None;
        for color in self.players() {
            let score = self.score(color);
            if best.is_none_or(|(_, b)| score >= b) {
                best = Some((color, score));
            }
        }
        best.map(|(c, _)| c).ok_or(BoardError::NoPlayers)
    }
}

/// Deep copy. The copy indexes its own grid and keeps the seating and turn,
/// but decision makers stay with the original board.
impl Clone for Board {
    fn clone(&self) -> Self {
        let grid = self.grid.fork();
        let territories = self
            .territories
            .iter()
            .map(|t| {
                let mut t = t.clone();
                t.relink(&grid);
                t
            })
            .collect();
        Self {
            grid,
            last_grid: self.last_grid.clone(),
            territories,
            prisoners: self.prisoners.clone(),
            players: self.players.keys().map(|&c| (c, None)).collect(),
            current: self.current,
        }
    }
}

impl Index<Point> for Board {
    type Output = Color;

    fn index(&self, p: Point) -> &Color {
        &self.grid[p]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("height", &self.height())
            .field("width", &self.width())
            .field("territories", &self.territories.len())
            .field("players", &self.players.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{FirstMovePlayer, ScriptedPlayer};

    fn board(s: &str) -> Board {
        Board::from_grid(s.parse().unwrap())
    }

    #[test]
    fn test_square_board_creation() {
        let b = Board::new(5).unwrap();
        assert_eq!((b.height(), b.width()), (5, 5));
        assert_eq!(b.territories.len(), 1);
        assert_eq!(b.territories[0].color(), Color::Empty);
        assert_eq!(b.territories[0].size(), 25);
        assert_eq!(b.grid(), b.last_grid());
    }

    #[test]
    fn test_non_square_board_creation() {
        let b = Board::with_size(3, 7).unwrap();
        assert_eq!((b.height(), b.width()), (3, 7));
        assert_eq!(b.territories.len(), 1);
        assert_eq!(b.territories[0].size(), 21);
        assert!(Board::with_size(0, 3).is_err());
    }

    #[test]
    fn test_circular_board_creation() {
        let cases = [
            (
                (5, 5),
                "
                # . . . #
                . . . . .
                . . . . .
                . . . . .
                # . . . #",
            ),
            (
                (9, 7),
                "
                # # . . . # #
                # . . . . . #
                . . . . . . .
                . . . . . . .
                . . . . . . .
                . . . . . . .
                . . . . . . .
                # . . . . . #
                # # . . . # #",
            ),
        ];
        for ((h, w), expected) in cases {
            let b = Board::circular(h, w).unwrap();
            let expected: Grid = expected.parse().unwrap();
            assert_eq!(b.grid(), &expected);
            assert_eq!(b.territories.len(), 1);
            assert_eq!(b.territories[0].size(), expected.count(Color::Empty));
        }
    }

    #[test]
    fn test_get_item() {
        let b = Board::from_grid(
            Grid::from_values(&[[0, 1, 1, 0], [0, 0, 2, 0], [0, -1, -1, 0]]).unwrap(),
        );
        assert_eq!(b[(0, 0)], Color::Empty);
        assert_eq!(b[(0, 1)], Color::Black);
        assert_eq!(b[(1, 2)], Color::White);
        assert_eq!(b[(2, 2)], Color::Wall);
        assert_eq!(b.get(3, 0), None);
        assert_eq!(b.get_territory(2, 2), None);
    }

    #[test]
    fn test_from_grid_territory_count() {
        let cases = [
            (". . . . .\n. . . . .\n. . . . .\n. . . . .", 1),
            (". . . . .\n. . . X .\n. . . X .\n. . . . .", 2),
            (". . . . .\n. . . X .\n. O . X .\n. O . . .\n. . . . .", 3),
            ("X . X\n. # .\nX . X", 8),
        ];
        for (diagram, count) in cases {
            assert_eq!(board(diagram).territories.len(), count, "{diagram}");
        }
    }

    #[test]
    fn test_next_player() {
        let mut b = Board::new(9).unwrap();
        assert_eq!(b.next_player(None), Err(BoardError::NoPlayers));
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        assert_eq!(b.current_player(), Some(Color::Black));
        assert_eq!(b.next_player(None), Ok(Color::White));
        assert_eq!(b.next_player(Some(Color::White)), Ok(Color::Black));
        assert_eq!(
            b.next_player(Some(Color::Yellow)),
            Err(BoardError::PlayerNotJoined(Color::Yellow))
        );
    }

    #[test]
    fn test_join() {
        let mut b = Board::new(9).unwrap();
        let white = ScriptedPlayer::new("w", []).with_color(Color::White);
        assert_eq!(b.join(Box::new(white)), Ok(Color::White));
        assert_eq!(b.join(Box::new(FirstMovePlayer::new("b"))), Ok(Color::Black));
        let again = ScriptedPlayer::new("w2", []).with_color(Color::White);
        assert_eq!(b.join(Box::new(again)), Err(BoardError::ColorTaken(Color::White)));
        let wall = ScriptedPlayer::new("x", []).with_color(Color::Wall);
        assert_eq!(b.join(Box::new(wall)), Err(BoardError::NotPlayerColor(Color::Wall)));
        // First to join moves first.
        assert_eq!(b.current_player(), Some(Color::White));
        assert_eq!(b.player(Color::Black).map(|p| p.name()), Some("b"));
    }

    #[test]
    fn test_join_until_full() {
        let mut b = Board::new(9).unwrap();
        for (i, color) in PLAYER_COLORS.into_iter().enumerate() {
            let p = FirstMovePlayer::new(format!("p{i}"));
            assert_eq!(b.join(Box::new(p)), Ok(color));
        }
        assert_eq!(
            b.join(Box::new(FirstMovePlayer::new("late"))),
            Err(BoardError::BoardFull)
        );
    }

    #[test]
    fn test_remove_player() {
        let mut b = Board::new(9).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        let removed = b.remove_player(Color::Black).unwrap().unwrap();
        assert_eq!(removed.name(), "p1");
        assert_eq!(b.current_player(), Some(Color::White));
        assert!(matches!(
            b.remove_player(Color::Yellow),
            Err(BoardError::PlayerNotJoined(Color::Yellow))
        ));
        b.remove_player(Color::White).unwrap();
        assert_eq!(b.player_count(), 0);
        assert_eq!(b.current_player(), None);
    }

    #[test]
    fn test_clear_players() {
        let mut b = Board::new(9).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        b.clear_players();
        b.clear_players();
        assert_eq!(b.player_count(), 0);
        assert_eq!(b.current_player(), None);
    }

    #[test]
    fn test_is_playable() {
        let cases = [
            (
                "
                X O . O X
                X O O O X
                X O . O X
                X O O O X
                X X X X X",
                vec![
                    (0, 0, Color::Black, false),
                    (0, 2, Color::Black, false),
                    (2, 2, Color::Black, false),
                    (0, 2, Color::White, true),
                    (2, 2, Color::White, true),
                ],
            ),
            (
                "
                X O . O X
                X O O O X
                X X X X X",
                vec![
                    (0, 0, Color::Black, false),
                    (0, 2, Color::Black, true),
                    (0, 2, Color::White, false),
                ],
            ),
            (
                "
                # # . . X .
                # . . X . X
                . . . . X .",
                vec![
                    (0, 0, Color::Black, false),
                    (1, 1, Color::Black, true),
                    (1, 1, Color::White, true),
                    (1, 4, Color::Black, true),
                    (1, 4, Color::White, false),
                ],
            ),
        ];
        for (diagram, checks) in cases {
            let b = board(diagram);
            for (x, y, color, expected) in checks {
                assert_eq!(
                    b.is_playable(x, y, color),
                    expected,
                    "{color} at ({x}, {y}) on\n{diagram}"
                );
            }
        }
    }

    #[test]
    fn test_check_move_reasons() {
        let b = board(
            "
            X O . O X
            X O O O X
            X O . O X
            X O O O X
            X X X X X",
        );
        let reason = |x, y, color| match b.check_move(x, y, color) {
            Err(BoardError::Illegal { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(reason(0, 0, Color::Black), Some(IllegalMove::Occupied));
        assert_eq!(reason(0, 2, Color::Black), Some(IllegalMove::Surrounded));
        assert_eq!(
            b.check_move(0, 2, Color::Empty),
            Err(BoardError::NotPlayerColor(Color::Empty))
        );
        assert_eq!(
            b.check_move(7, 2, Color::Black),
            Err(BoardError::OutOfBounds { x: 7, y: 2 })
        );

        let b = board("X O . O X\nX O O O X\nX X X X X");
        assert_eq!(
            b.check_move(0, 2, Color::White),
            Err(BoardError::Illegal {
                x: 0,
                y: 2,
                reason: IllegalMove::Suicide
            })
        );
    }

    #[test]
    fn test_point_enclosed_by_walls_and_opponent() {
        let b = board("# # #\n# . #\n# # #");
        assert!(!b.is_playable(1, 1, Color::Black));
        assert!(b.playable_moves(Color::White).is_empty());
        let b = board("# . O\n. O .\n. . .");
        assert!(!b.is_playable(0, 1, Color::Black));
        assert!(b.is_playable(0, 1, Color::White));
    }

    #[test]
    fn test_playable_moves() {
        let cases: [(&str, Vec<Point>, Vec<Point>); 4] = [
            (
                "X O . O X\nX O O O X\nX O . . X",
                vec![(2, 2), (2, 3)],
                vec![(0, 2), (2, 2), (2, 3)],
            ),
            (
                ". .\n. .",
                vec![(0, 0), (0, 1), (1, 0), (1, 1)],
                vec![(0, 0), (0, 1), (1, 0), (1, 1)],
            ),
            (
                ". X .\nX . X\n. X .",
                vec![(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)],
                vec![],
            ),
            (
                "X O . O X\nX O O O X\nX O . O X\nX O O O X\nX X X X X",
                vec![],
                vec![(0, 2), (2, 2)],
            ),
        ];
        for (diagram, black, white) in cases {
            let b = board(diagram);
            assert_eq!(b.playable_moves(Color::Black), black, "{diagram}");
            assert_eq!(b.playable_moves(Color::White), white, "{diagram}");
        }
    }

    #[test]
    fn test_play() {
        let mut b = Board::new(5).unwrap();
        b.play(0, 0, Color::Black).unwrap();
        assert_eq!(b[(0, 0)], Color::Black);
        b.play(0, 1, Color::White).unwrap();
        assert_eq!(b[(0, 1)], Color::White);
        b.play(0, 2, Color::Black).unwrap();
        assert!(b.play(0, 1, Color::White).is_err());
        b.play(3, 3, Color::White).unwrap();
        b.play(1, 1, Color::Black).unwrap();
        assert_eq!(b[(0, 1)], Color::Empty);
        assert_eq!(b.prisoners(Color::Black), 1);
        // Every black neighbor of (0, 1) keeps another liberty.
        assert!(b.play(0, 1, Color::White).is_err());
        assert_eq!(b[(0, 1)], Color::Empty);
    }

    #[test]
    fn test_play_joins_groups() {
        let mut b = board(
            "
            . X . .
            X . X .
            . X . .",
        );
        b.play(1, 1, Color::Black).unwrap();
        assert_eq!(b.territories(Some(Color::Black)).count(), 1);
        let group = b.get_territory(0, 1).unwrap();
        assert_eq!(group, &Territory::from_seed(b.grid(), 1, 2).unwrap());
        assert_eq!(group.size(), 5);
        assert_eq!(group.freedom().len(), 5);
    }

    #[test]
    fn test_play_rejects_non_player_color() {
        let mut b = Board::new(3).unwrap();
        assert_eq!(
            b.play(0, 0, Color::Wall),
            Err(BoardError::NotPlayerColor(Color::Wall))
        );
        assert_eq!(b.skip(Color::Empty), Err(BoardError::NotPlayerColor(Color::Empty)));
    }

    #[test]
    fn test_play_out_of_turn_only_warns() {
        let mut b = Board::new(5).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        b.play(2, 2, Color::White).unwrap();
        assert_eq!(b[(2, 2)], Color::White);
        b.play(1, 1, Color::Green).unwrap();
        assert_eq!(b[(1, 1)], Color::Green);
    }

    #[test]
    fn test_skip() {
        let mut b = Board::new(5).unwrap();
        b.play(0, 0, Color::Black).unwrap();
        let reference = b.grid().clone();
        assert_eq!(b.skip(Color::White), Ok(false));
        assert_eq!(b.grid(), &reference);
        assert_eq!(b.skip(Color::Black), Ok(true));
    }

    #[test]
    fn test_skip_on_empty_board_never_ends() {
        let mut b = Board::new(5).unwrap();
        assert_eq!(b.skip(Color::Black), Ok(false));
        assert_eq!(b.skip(Color::White), Ok(false));
    }

    #[test]
    fn test_skip_checks_turn() {
        let mut b = Board::new(5).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        assert_eq!(
            b.skip(Color::White),
            Err(BoardError::NotYourTurn {
                color: Color::White,
                expected: Color::Black
            })
        );
        assert_eq!(b.skip(Color::Black), Ok(false));
        assert_eq!(b.current_player(), Some(Color::White));
    }

    #[test]
    fn test_winner() {
        let mut b = Board::new(19).unwrap();
        assert_eq!(b.winner(), Err(BoardError::NoPlayers));
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        assert_eq!(b.winner(), Ok(Color::White));
        b.grid.set((0, 0), Color::Black);
        assert_eq!(b.winner(), Ok(Color::Black));
        b.prisoners.insert(Color::White, 1);
        assert_eq!(b.winner(), Ok(Color::White));
        b.prisoners.insert(Color::Black, 1);
        assert_eq!(b.winner(), Ok(Color::Black));
    }

    #[test]
    fn test_around() {
        let b = board("X O . O X\nX O O O X\nX O . O X\nX O O O X");
        let set = |it: &mut dyn Iterator<Item = Point>| it.collect::<BTreeSet<_>>();
        assert_eq!(set(&mut b.around(0, 0)), BTreeSet::from([(0, 1), (1, 0)]));
        assert_eq!(
            set(&mut b.around(1, 1)),
            BTreeSet::from([(0, 1), (1, 0), (2, 1), (1, 2)])
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut b = Board::new(5).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p1"))).unwrap();
        b.join(Box::new(FirstMovePlayer::new("p2"))).unwrap();
        b.play(1, 1, Color::Black).unwrap();
        let mut copy = b.clone();
        assert_eq!(copy.grid(), b.grid());
        assert_ne!(copy.grid().id(), b.grid().id());
        assert!(copy.territories(None).all(|t| t.grid_id() == copy.grid().id()));
        assert_eq!(copy.current_player(), Some(Color::White));
        assert!(copy.player(Color::Black).is_none());

        copy.play(2, 2, Color::White).unwrap();
        copy.play(1, 2, Color::Black).unwrap();
        assert_eq!(b[(2, 2)], Color::Empty);
        assert_eq!(b.territories(Some(Color::Black)).count(), 1);
        assert_eq!(copy.territories(Some(Color::Black)).next().unwrap().size(), 2);
    }

    #[test]
    fn test_matrix_and_vertices() {
        let b = board("X . O\n# . X");
        assert_eq!(b.matrix(), vec![vec![1, 0, 2], vec![-1, 0, 1]]);
        assert_eq!(b.vertices(Color::Black), vec![(0, 0), (1, 2)]);
        assert_eq!(b.vertices(Color::Empty), vec![(0, 1), (1, 1)]);
    }
}
