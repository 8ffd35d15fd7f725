use crate::geometry::geo_enums::Facing;
use crate::geometry::geo_traits::{Overlaps, Shape};
use crate::geometry::primitives::{Edge, Point, Rect, SPolygon};

/// Separation (in the units of the stall) below which two shapes are considered touching.
const OVERLAP_TOLERANCE: f64 = 1e-7;

/// A single packed parking stall.
/// Either a rectangle or a parallelogram (angled stalls), stored as four corners counterclockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stall {
    pub corners: [Point; 4],
    /// Direction of the open end of the stall, towards the aisle it is entered from
    pub facing: Facing,
}

impl Stall {
    pub fn from_rect(r: Rect, facing: Facing) -> Self {
        Stall {
            corners: [
                Point(r.x_min, r.y_min),
                Point(r.x_max, r.y_min),
                Point(r.x_max, r.y_max),
                Point(r.x_min, r.y_max),
            ],
            facing,
        }
    }

    /// Closed ring of the stall outline (first corner repeated at the end)
    pub fn ring(&self) -> [Point; 5] {
        let [a, b, c, d] = self.corners;
        [a, b, c, d, a]
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..4).map(|i| Edge {
            start: self.corners[i],
            end: self.corners[(i + 1) % 4],
        })
    }

    /// Applies `f` to every corner, e.g. to move the stall into another coordinate system
    pub fn map_corners(&self, f: impl Fn(Point) -> Point) -> Stall {
        Stall {
            corners: self.corners.map(f),
            facing: self.facing,
        }
    }

    /// Projects the corners onto `axis`, returns the (min, max) interval
    fn project_on(&self, axis: (f64, f64)) -> (f64, f64) {
        self.corners
            .iter()
            .map(|p| p.0 * axis.0 + p.1 * axis.1)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
                (min.min(d), max.max(d))
            })
    }
}

impl Shape for Stall {
    fn centroid(&self) -> Point {
        //exact for parallelograms
        let (s_x, s_y) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(s_x, s_y), p| (s_x + p.0, s_y + p.1));
        Point(s_x / 4.0, s_y / 4.0)
    }

    fn area(&self) -> f64 {
        SPolygon::calculate_area(&self.corners).abs()
    }

    fn bbox(&self) -> Rect {
        SPolygon::generate_bounding_box(&self.corners)
    }
}

impl Overlaps<Stall> for Stall {
    /// Separating axis test, valid because stalls are convex.
    fn overlaps(&self, other: &Stall) -> bool {
        if !self.bbox().overlaps(&other.bbox()) {
            return false;
        }
        let separated = self.edge_iter().chain(other.edge_iter()).any(|edge| {
            let (n_x, n_y) = edge.normal();
            let len = (n_x * n_x + n_y * n_y).sqrt();
            if len == 0.0 {
                return false;
            }
            let axis = (n_x / len, n_y / len);
            let (a_min, a_max) = self.project_on(axis);
            let (b_min, b_max) = other.project_on(axis);
            a_max <= b_min + OVERLAP_TOLERANCE || b_max <= a_min + OVERLAP_TOLERANCE
        });
        !separated
    }
}

impl Overlaps<Rect> for Stall {
    fn overlaps(&self, rect: &Rect) -> bool {
        self.overlaps(&Stall::from_rect(*rect, self.facing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parallelogram(x: f64, lean: f64) -> Stall {
        Stall {
            corners: [
                Point(x, 0.0),
                Point(x + 3.0, 0.0),
                Point(x + 3.0 + lean, 4.0),
                Point(x + lean, 4.0),
            ],
            facing: Facing::Up,
        }
    }

    #[test]
    fn adjacent_parallelograms_touch_without_overlapping() {
        let a = parallelogram(0.0, 4.0);
        let b = parallelogram(3.0, 4.0);
        //bounding boxes overlap, the shapes only share an edge
        assert!(a.bbox().overlaps(&b.bbox()));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&parallelogram(1.5, 4.0)));
    }

    #[test]
    fn ring_is_closed() {
        let s = Stall::from_rect(Rect::try_new(0.0, 0.0, 2.5, 5.0).unwrap(), Facing::Up);
        let ring = s.ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_eq!(s.centroid(), Point(1.25, 2.5));
        assert_eq!(s.area(), 12.5);
    }
}
