//! Rectangular array of cell states.
//!
//! Points are `(x, y)` pairs where `x` is the row (`x < height`) and `y` the
//! column (`y < width`). The grid only knows about adjacency; legality and
//! territories live in [`crate::board`] and [`crate::territory`].

use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;
use crate::error::BoardError;

/// A point on the grid as `(row, column)`.
pub type Point = (usize, usize);

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

fn next_grid_id() -> u64 {
    NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed)
}

/// A 2D array of [`Color`] stored row-major.
///
/// Each grid carries an identity tag so territories can tell which grid they
/// index into. Plain clones (used for snapshots) keep the tag; [`Grid::fork`]
/// hands out a fresh one. Equality only compares shape and cells.
#[derive(Clone, Debug)]
pub struct Grid {
    id: u64,
    height: usize,
    width: usize,
    cells: Vec<Color>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height && self.width == other.width && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Create an empty grid of `height` rows and `width` columns.
    pub fn new(height: usize, width: usize) -> Result<Self, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::InvalidSize { height, width });
        }
        Ok(Self::filled(height, width, Color::Empty))
    }

    pub(crate) fn filled(height: usize, width: usize, color: Color) -> Self {
        Self {
            id: next_grid_id(),
            height,
            width,
            cells: vec![color; height * width],
        }
    }

    /// Build a grid from rows of colors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::InvalidSize { height, width });
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(BoardError::RaggedGrid);
        }
        Ok(Self {
            id: next_grid_id(),
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from numeric color values (see [`Color::value`]).
    pub fn from_values<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let rows = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&v| Color::try_from(v)).collect())
            .collect::<Result<Vec<Vec<Color>>, _>>()?;
        Self::from_rows(rows)
    }

    /// Copy of this grid with a fresh identity.
    pub fn fork(&self) -> Self {
        Self {
            id: next_grid_id(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn contains(&self, (x, y): Point) -> bool {
        x < self.height && y < self.width
    }

    #[inline]
    fn idx(&self, (x, y): Point) -> usize {
        x * self.width + y
    }

    /// Cell state at `p`, `None` when off the grid.
    pub fn get(&self, p: Point) -> Option<Color> {
        if self.contains(p) {
            Some(self.cells[self.idx(p)])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, p: Point, color: Color) {
        let i = self.idx(p);
        self.cells[i] = color;
    }

    /// The up to 4 orthogonal neighbors of `(x, y)` that lie on the grid.
    pub fn around(&self, x: usize, y: usize) -> std::vec::IntoIter<Point> {
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if x + 1 < self.height {
            v.push((x + 1, y));
        }
        if y + 1 < self.width {
            v.push((x, y + 1));
        }
        // An off-grid center can still yield out-of-range candidates.
        v.retain(|&p| self.contains(p));
        v.into_iter()
    }

    /// Like [`Grid::around`], with `(x, y)` itself yielded last.
    pub fn around_with_center(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + use<> {
        self.around(x, y).chain(std::iter::once((x, y)))
    }

    /// Every point of the grid, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |x| (0..width).map(move |y| (x, y)))
    }

    /// Number of cells holding `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// True if at least one player stone is on the grid.
    pub fn has_stones(&self) -> bool {
        self.cells.iter().any(|c| c.is_player())
    }

    /// The grid as numeric color values.
    pub fn values(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }
}

impl Index<Point> for Grid {
    type Output = Color;

    fn index(&self, p: Point) -> &Color {
        assert!(self.contains(p), "point {p:?} is outside the grid");
        &self.cells[self.idx(p)]
    }
}

/// Parses the text rendering produced by `Display`: one line per row, one
/// symbol per cell, whitespace ignored.
impl FromStr for Grid {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| Color::from_symbol(c).ok_or(BoardError::UnknownSymbol(c)))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for (i, c) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
