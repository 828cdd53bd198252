//! Scoped wall removal.

use std::ops::Deref;

use gridpath_core::Point;

use crate::maze::{Maze, Tile};

/// A wall temporarily opened on a borrowed [`Maze`].
///
/// The wall is put back when the guard drops, including on early return or
/// `?` propagation out of a trial. While the guard lives, the maze is only
/// reachable through it, read-only, so it can be handed to a search engine.
#[derive(Debug)]
pub struct WallToggle<'a> {
    maze: &'a mut Maze,
    pos: Point,
}

impl<'a> WallToggle<'a> {
    pub(crate) fn new(maze: &'a mut Maze, pos: Point) -> Option<Self> {
        if maze.tile(pos) != Tile::Wall || !maze.bounds().contains(pos) {
            return None;
        }
        maze.set(pos, Tile::Open);
        Some(Self { maze, pos })
    }

    /// The opened position.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }
}

impl Deref for WallToggle<'_> {
    type Target = Maze;
    fn deref(&self) -> &Maze {
        self.maze
    }
}

impl Drop for WallToggle<'_> {
    fn drop(&mut self) {
        self.maze.set(self.pos, Tile::Wall);
    }
}
