use itertools::Itertools;
use log::warn;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, Rect, SPolygon};
use crate::geometry::{LocalProjection, ProjectionMode};

/// A drawn parking lot: the `(lon, lat)` ring as received from the drawing surface,
/// and its boundary projected into local meters.
#[derive(Clone, Debug)]
pub struct Lot {
    /// `(lon, lat)` vertices as drawn, closing vertex included if it was drawn
    pub ring: Vec<Point>,
    pub projection: LocalProjection,
    /// Boundary in local meters, `None` if the ring has fewer than 3 distinct vertices
    pub boundary: Option<SPolygon>,
}

impl Lot {
    /// Never fails: a malformed ring yields a lot without a boundary, which has no area and
    /// fits no stalls.
    pub fn new(ring: Vec<Point>, mode: ProjectionMode) -> Self {
        let geo_bbox = Rect::enclosing(ring.iter().copied()).unwrap_or(Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 0.0,
            y_max: 0.0,
        });
        let projection = LocalProjection::anchored_at(mode, geo_bbox);
        let projected = ring.iter().map(|p| projection.project(*p)).collect_vec();

        let boundary = match SPolygon::new(projected) {
            Ok(boundary) => Some(boundary),
            Err(e) => {
                warn!("[LOT] degenerate boundary, treating as empty: {e}");
                None
            }
        };

        Lot {
            ring,
            projection,
            boundary,
        }
    }

    /// Planar area of the boundary in m²
    pub fn area_m2(&self) -> f64 {
        self.boundary.as_ref().map_or(0.0, |b| b.area())
    }

    /// Converts a point in local meters back to `(lon, lat)`
    pub fn to_geo(&self, p: Point) -> Point {
        self.projection.unproject(p)
    }
}
