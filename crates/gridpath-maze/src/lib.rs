//! Grid adapters for the `gridpath` engine.
//!
//! - [`Maze`]: a wall grid with 4-way unit-cost moves
//! - [`OrientedMaze`]: the same grid with a heading per state and a turn
//!   penalty
//! - [`WallToggle`]: scoped wall removal, restored on drop
//! - [`trials`]: wall-removal and jump shortcut counting, serial or with
//!   one deep-copied maze per worker

pub mod maze;
pub mod oriented;
pub mod toggle;
pub mod trials;

pub use maze::{Maze, Tile};
pub use oriented::{Facing, OrientedMaze};
pub use toggle::WallToggle;
pub use trials::{
    count_jump_shortcuts, count_wall_shortcuts, first_blocking_wall, par_count_wall_shortcuts,
};
