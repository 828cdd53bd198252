//! Wall grid with 4-way unit-cost movement.

use gridpath::{AstarPather, Pather, WeightedPather, manhattan};
use gridpath_core::{Grid, Point, Range};

use crate::toggle::WallToggle;

/// Terrain of one maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Open,
    Wall,
}

/// A rectangular maze. Cells outside the grid count as walls.
///
/// `Clone` copies the whole grid, so each parallel worker can own one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    grid: Grid<Tile>,
}

impl Maze {
    /// Wrap an existing tile grid.
    pub fn new(grid: Grid<Tile>) -> Self {
        Self { grid }
    }

    /// A `width × height` maze with no walls.
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(Grid::new(width, height, Tile::Open))
    }

    /// A `width × height` maze with walls at `walls`. Positions outside the
    /// grid are ignored.
    pub fn with_walls(width: i32, height: i32, walls: impl IntoIterator<Item = Point>) -> Self {
        let mut maze = Self::open(width, height);
        for p in walls {
            maze.set(p, Tile::Wall);
        }
        maze
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    #[inline]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Tile at `p`; out-of-bounds reads as [`Tile::Wall`].
    #[inline]
    pub fn tile(&self, p: Point) -> Tile {
        self.grid.at(p).copied().unwrap_or(Tile::Wall)
    }

    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.tile(p) == Tile::Open
    }

    /// Overwrite the tile at `p`, returning the previous one, or `None` if
    /// `p` is outside the grid.
    pub fn set(&mut self, p: Point, tile: Tile) -> Option<Tile> {
        self.grid.set(p, tile)
    }

    /// Wall positions in row-major order.
    pub fn walls(&self) -> Vec<Point> {
        self.grid.positions(|&t| t == Tile::Wall)
    }

    /// Walls not on the outer border; the candidates for removal trials.
    pub fn inner_walls(&self) -> Vec<Point> {
        let inner = self.bounds().inner(1);
        self.walls()
            .into_iter()
            .filter(|&p| inner.contains(p))
            .collect()
    }

    /// Open the wall at `p` until the returned guard is dropped.
    ///
    /// Returns `None` if `p` is not a wall.
    pub fn open_wall(&mut self, p: Point) -> Option<WallToggle<'_>> {
        WallToggle::new(self, p)
    }
}

impl Pather for Maze {
    type State = Point;

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for Maze {
    fn cost(&self, _: Point, _: Point) -> i32 {
        1
    }
}

impl AstarPather for Maze {
    fn estimate(&self, from: Point, goal: Point) -> i32 {
        manhattan(from, goal)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn maze_round_trip() {
        let m = Maze::with_walls(4, 3, [Point::new(1, 1), Point::new(2, 1)]);
        let json = serde_json::to_string(&m).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.inner_walls(), vec![Point::new(1, 1), Point::new(2, 1)]);
    }
}
