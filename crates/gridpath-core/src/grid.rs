//! The [`Grid`] type: an owned 2D grid of cells.
//!
//! Unlike a view over shared storage, cloning a `Grid` copies every cell.
//! Search workers that toggle cells concurrently each hold their own copy.

use crate::geom::{Point, Range};

/// A rectangular grid of `T` cells anchored at (0, 0), stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Clone> Grid<T> {
    /// Create a `width × height` grid with every cell set to `fill`.
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![fill; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Set every cell to `cell`.
    pub fn fill(&mut self, cell: T) {
        for c in self.cells.iter_mut() {
            *c = cell.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every position.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = Range::new(0, 0, width, height).iter().map(&mut f).collect();
        Self {
            cells,
            width,
            height,
        }
    }

    /// The bounding range `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Replace the cell at `p`, returning the previous value.
    /// Out-of-bounds writes are ignored and return `None`.
    pub fn set(&mut self, p: Point, cell: T) -> Option<T> {
        let slot = self.at_mut(p)?;
        Some(std::mem::replace(slot, cell))
    }

    /// Row-major iterator over `(position, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Positions of all cells matching `pred`, in row-major order.
    pub fn positions(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<Point> {
        self.iter()
            .filter(|(_, c)| pred(c))
            .map(|(p, _)| p)
            .collect()
    }

    /// Number of cells matching `pred`.
    pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }
}
