use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    /// Returns the (not normalized) left-hand normal of the edge.
    pub fn normal(&self) -> (f64, f64) {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        (-dy, dx)
    }

    /// Returns true if a horizontal ray shot from `point` towards +x crosses this edge.
    ///
    /// Uses the half-open rule on the y-range of the edge, so a ray through a shared vertex
    /// is counted exactly once across both adjacent edges.
    pub fn crossed_by_ray_from(&self, point: &Point) -> bool {
        let Point(x_s, y_s) = self.start;
        let Point(x_e, y_e) = self.end;
        let Point(p_x, p_y) = *point;

        if (y_s > p_y) == (y_e > p_y) {
            return false;
        }
        let x_cross = x_s + (p_y - y_s) * (x_e - x_s) / (y_e - y_s);
        p_x < x_cross
    }
}
