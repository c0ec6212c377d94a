//! Connected regions of same-colored points and their liberties.
//!
//! A [`Territory`] is a maximal 4-connected set of points sharing one color,
//! together with its liberty set: the empty points adjacent to at least one
//! member. Empty points are partitioned into territories too; their liberty
//! set is always empty.
//!
//! Territories never own grid data. They hold coordinate sets into a
//! [`Grid`] owned by the board, and every operation that needs cell states
//! takes that grid explicitly. The grid identity recorded at construction
//! lets [`Territory::merge`] refuse territories coming from another grid.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::color::Color;
use crate::error::TerritoryError;
use crate::grid::{Grid, Point};

/// A maximal connected region of one color, with its liberty set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Territory {
    grid_id: u64,
    color: Color,
    vertices: BTreeSet<Point>,
    freedom: BTreeSet<Point>,
}

/// Flood-fill from `seed` over points holding the seed's color.
fn explore(grid: &Grid, seed: Point) -> BTreeSet<Point> {
    let color = grid[seed];
    let mut explored = BTreeSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    while let Some((x, y)) = queue.pop_front() {
        for n in grid.around(x, y) {
            if grid[n] == color && explored.insert(n) {
                queue.push_back(n);
            }
        }
    }
    explored
}

/// Empty points adjacent to any of `vertices`.
fn liberties_of<'a>(grid: &Grid, vertices: impl IntoIterator<Item = &'a Point>) -> BTreeSet<Point> {
    vertices
        .into_iter()
        .flat_map(|&(x, y)| grid.around(x, y))
        .filter(|&n| grid[n] == Color::Empty)
        .collect()
}

impl Territory {
    /// Build the territory containing `(x, y)` by exploring the grid.
    pub fn from_seed(grid: &Grid, x: usize, y: usize) -> Result<Self, TerritoryError> {
        match grid.get((x, y)) {
            None => Err(TerritoryError::OutOfBounds(x, y)),
            Some(Color::Wall) => Err(TerritoryError::WallSeed(x, y)),
            Some(_) => Ok(Self::explored(grid, (x, y))),
        }
    }

    /// Infallible variant of [`Territory::from_seed`] for a point known to be
    /// on the grid and not a wall.
    pub(crate) fn explored(grid: &Grid, seed: Point) -> Self {
        let vertices = explore(grid, seed);
        Self::with_vertices(grid, grid[seed], vertices)
    }

    fn with_vertices(grid: &Grid, color: Color, vertices: BTreeSet<Point>) -> Self {
        let freedom = if color.is_player() {
            liberties_of(grid, &vertices)
        } else {
            BTreeSet::new()
        };
        Self {
            grid_id: grid.id(),
            color,
            vertices,
            freedom,
        }
    }

    /// Build a territory from an explicit set of points, without exploring.
    ///
    /// The points must all be on the grid, hold the same non-wall color, and
    /// form exactly one connected region: flood-filling from any member has
    /// to give back the same set.
    pub fn from_vertices(
        grid: &Grid,
        vertices: impl IntoIterator<Item = Point>,
    ) -> Result<Self, TerritoryError> {
        let vertices: BTreeSet<Point> = vertices.into_iter().collect();
        let first = *vertices.first().ok_or(TerritoryError::NoVertices)?;
        if let Some(&(x, y)) = vertices.iter().find(|&&p| !grid.contains(p)) {
            return Err(TerritoryError::OutOfBounds(x, y));
        }
        let color = grid[first];
        if vertices.iter().any(|&p| grid[p] != color) {
            return Err(TerritoryError::MixedColors);
        }
        if color == Color::Wall {
            return Err(TerritoryError::WallVertex);
        }
        if explore(grid, first) != vertices {
            return Err(TerritoryError::Incoherent);
        }
        Ok(Self::with_vertices(grid, color, vertices))
    }

    /// Merge several territories into one, optionally through a connecting
    /// point. Liberties are derived again from scratch over the union.
    pub fn merge(
        grid: &Grid,
        territories: &[&Territory],
        with_vertex: Option<Point>,
    ) -> Result<Self, TerritoryError> {
        if territories.len() < 2 {
            return Err(TerritoryError::NotEnoughTerritories(territories.len()));
        }
        if territories.iter().any(|t| t.grid_id != grid.id()) {
            return Err(TerritoryError::DifferentGrids);
        }
        let vertices = territories
            .iter()
            .flat_map(|t| t.vertices.iter().copied())
            .chain(with_vertex);
        Self::from_vertices(grid, vertices)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of points in the territory.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &BTreeSet<Point> {
        &self.vertices
    }

    /// Identity of the grid this territory indexes into.
    pub fn grid_id(&self) -> u64 {
        self.grid_id
    }

    pub(crate) fn relink(&mut self, grid: &Grid) {
        self.grid_id = grid.id();
    }

    /// The live liberty set.
    pub fn freedom(&self) -> &BTreeSet<Point> {
        &self.freedom
    }

    /// True if flood-filling from a member reproduces exactly the members.
    pub fn is_coherent(&self, grid: &Grid) -> bool {
        match self.vertices.first() {
            Some(&first) => explore(grid, first) == self.vertices,
            None => false,
        }
    }

    /// True if `(x, y)` is orthogonally adjacent to a member.
    pub fn is_touching(&self, grid: &Grid, x: usize, y: usize) -> bool {
        grid.around(x, y).any(|p| self.vertices.contains(&p))
    }

    /// True if `(x, y)` is a member, and the color matches when one is given.
    pub fn includes(&self, x: usize, y: usize, color: Option<Color>) -> bool {
        color.is_none_or(|c| c == self.color) && self.vertices.contains(&(x, y))
    }

    /// True if any member of `self` touches a member of `other`.
    pub fn is_nearby(&self, grid: &Grid, other: &Territory) -> bool {
        self.vertices
            .iter()
            .any(|&(x, y)| other.is_touching(grid, x, y))
    }

    /// The liberty set this territory would have if `placed` (a point and a
    /// color) were put on the grid. A stone of the territory's own color
    /// touching it joins the territory. Without `placed`, the liberties are
    /// recomputed from the grid. A `placed` point off the grid is ignored.
    /// Never mutates anything.
    pub fn hypothetical_freedom(&self, grid: &Grid, placed: Option<(Point, Color)>) -> BTreeSet<Point> {
        let Some((p, color)) = placed.filter(|&(p, _)| grid.contains(p)) else {
            return liberties_of(grid, &self.vertices);
        };
        let joins = color == self.color && self.is_touching(grid, p.0, p.1);
        self.vertices
            .iter()
            .chain(joins.then_some(&p))
            .flat_map(|&(x, y)| grid.around(x, y))
            .filter(|&n| n != p && grid[n] == Color::Empty)
            .collect()
    }

    /// Apply a single point change to this territory. `grid` already holds
    /// `color` at `point`.
    ///
    /// Points off the grid, or neither touching nor inside the territory, are
    /// ignored. Splits
    /// are not detected here; the board checks the territory the point was
    /// removed from.
    pub fn update(&mut self, grid: &Grid, point: Point, color: Color) {
        let (x, y) = point;
        if !grid.contains(point)
            || !grid
                .around_with_center(x, y)
                .any(|p| self.vertices.contains(&p))
        {
            return;
        }
        let member = self.vertices.contains(&point);
        let tracks_freedom = self.color.is_player();
        if color == self.color {
            self.vertices.insert(point);
            if tracks_freedom {
                self.freedom.remove(&point);
                self.freedom
                    .extend(grid.around(x, y).filter(|&n| grid[n] == Color::Empty));
            }
        } else if member {
            self.vertices.remove(&point);
            if tracks_freedom {
                self.freedom.remove(&point);
                if grid[point] == Color::Empty && self.is_touching(grid, x, y) {
                    self.freedom.insert(point);
                }
                for n in grid.around(x, y) {
                    if self.freedom.contains(&n) && !self.is_touching(grid, n.0, n.1) {
                        self.freedom.remove(&n);
                    }
                }
            }
        } else if tracks_freedom {
            if grid[point] == Color::Empty {
                self.freedom.insert(point);
            } else {
                self.freedom.remove(&point);
            }
        }
    }

    /// Union of same-colored `parts` joined through `point`, which the grid
    /// already holds. Unlike [`Territory::merge`] nothing is validated: the
    /// board only calls this with territories touching `point`.
    pub(crate) fn joined(grid: &Grid, parts: &[&Territory], point: Point) -> Self {
        let vertices = parts
            .iter()
            .flat_map(|t| t.vertices.iter().copied())
            .chain(std::iter::once(point))
            .collect();
        Self::with_vertices(grid, grid[point], vertices)
    }

    /// Break the territory into its connected components. Returns `self`
    /// alone when it is still connected.
    pub fn split(self, grid: &Grid) -> Vec<Territory> {
        let mut remaining = self.vertices.clone();
        let mut parts = Vec::new();
        while let Some(seed) = remaining.pop_first() {
            let mut part = BTreeSet::from([seed]);
            let mut queue = VecDeque::from([seed]);
            while let Some((x, y)) = queue.pop_front() {
                for n in grid.around(x, y) {
                    if remaining.remove(&n) {
                        part.insert(n);
                        queue.push_back(n);
                    }
                }
            }
            parts.push(part);
        }
        if parts.len() <= 1 {
            return vec![self];
        }
        parts
            .into_iter()
            .map(|part| Self::with_vertices(grid, self.color, part))
            .collect()
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Territory color={} size={} liberties={}>",
            self.color,
            self.size(),
            self.freedom.len()
        )
    }
}
