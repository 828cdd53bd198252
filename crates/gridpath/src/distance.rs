use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible for 4-way movement with unit steps and non-negative extra
/// penalties such as turning costs.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
