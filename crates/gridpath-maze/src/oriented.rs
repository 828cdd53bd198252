//! Heading-aware maze: states carry a facing, turning costs extra.

use std::fmt;

use gridpath::{AstarPather, Pather, WeightedPather, manhattan};
use gridpath_core::{Dir, Point};

use crate::maze::Maze;

/// A position plus the heading it is faced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing {
    pub pos: Point,
    pub dir: Dir,
}

impl Facing {
    pub const fn new(pos: Point, dir: Dir) -> Self {
        Self { pos, dir }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pos, self.dir)
    }
}

/// A [`Maze`] walked with a heading.
///
/// From each state the walker may step forward (cost 1) or rotate 90° in
/// place either way (cost `turn_cost`). Any heading on the goal cell counts
/// as reaching the goal.
#[derive(Debug, Clone, Copy)]
pub struct OrientedMaze<'a> {
    maze: &'a Maze,
    turn_cost: i32,
}

impl<'a> OrientedMaze<'a> {
    pub fn new(maze: &'a Maze, turn_cost: i32) -> Self {
        Self { maze, turn_cost }
    }

    #[inline]
    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    #[inline]
    pub fn turn_cost(&self) -> i32 {
        self.turn_cost
    }
}

impl Pather for OrientedMaze<'_> {
    type State = Facing;

    fn neighbors(&self, s: Facing, buf: &mut Vec<Facing>) {
        let ahead = s.pos.step(s.dir);
        if self.maze.is_open(ahead) {
            buf.push(Facing::new(ahead, s.dir));
        }
        buf.push(Facing::new(s.pos, s.dir.clockwise()));
        buf.push(Facing::new(s.pos, s.dir.counter_clockwise()));
    }

    fn is_goal(&self, s: Facing, goal: Facing) -> bool {
        s.pos == goal.pos
    }
}

impl WeightedPather for OrientedMaze<'_> {
    fn cost(&self, from: Facing, to: Facing) -> i32 {
        let turns = from.dir.turns_to(to.dir) as i32;
        manhattan(from.pos, to.pos) + turns * self.turn_cost
    }
}

impl AstarPather for OrientedMaze<'_> {
    // Turns only add to the true cost, so plain Manhattan stays admissible.
    fn estimate(&self, from: Facing, goal: Facing) -> i32 {
        manhattan(from.pos, goal.pos)
    }
}
