//! **gridpath-core**: geometry primitives and owned cell grids.
//!
//! These are the state and storage types the `gridpath` engine and its grid
//! adapters are built on: integer [`Point`]s, half-open [`Range`]s, the four
//! cardinal headings ([`Dir`]), and a deep-cloning [`Grid`].

pub mod geom;
pub mod grid;

pub use geom::{Dir, Point, Range, RangeIter};
pub use grid::Grid;
