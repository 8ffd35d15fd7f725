use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{Point, Rect};

/// Which meters-per-degree approximation to use when projecting a lot into local meters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// `111320 * cos(lat)` meters per degree of longitude at the lot's center latitude,
    /// `110540` meters per degree of latitude
    #[default]
    LatitudeCorrected,
    /// Fixed `82000` / `111000` meters per degree, only accurate around 42°N
    Fixed,
}

/// Local equirectangular projection between `(lon, lat)` degrees and `(x, y)` meters.
///
/// The scale is evaluated once and held constant for the whole lot, which is only valid for
/// lots small enough that the curvature of the earth is negligible (a few km at most).
/// The origin maps to `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalProjection {
    /// `(lon, lat)` of the local origin
    pub origin: Point,
    /// Meters per degree of longitude
    pub lon_to_m: f64,
    /// Meters per degree of latitude
    pub lat_to_m: f64,
}

impl LocalProjection {
    pub const LON_TO_M_AT_EQUATOR: f64 = 111_320.0;
    pub const LAT_TO_M: f64 = 110_540.0;
    pub const FIXED_LON_TO_M: f64 = 82_000.0;
    pub const FIXED_LAT_TO_M: f64 = 111_000.0;

    pub fn new(mode: ProjectionMode, origin: Point, center_lat: f64) -> Self {
        let (lon_to_m, lat_to_m) = match mode {
            ProjectionMode::LatitudeCorrected => (
                Self::LON_TO_M_AT_EQUATOR * center_lat.to_radians().cos(),
                Self::LAT_TO_M,
            ),
            ProjectionMode::Fixed => (Self::FIXED_LON_TO_M, Self::FIXED_LAT_TO_M),
        };
        LocalProjection {
            origin,
            lon_to_m,
            lat_to_m,
        }
    }

    /// Projection anchored at the minimum corner of a geographic bounding box,
    /// with the scale taken at the box's center latitude.
    pub fn anchored_at(mode: ProjectionMode, bbox: Rect) -> Self {
        let center_lat = (bbox.y_min + bbox.y_max) / 2.0;
        Self::new(mode, Point(bbox.x_min, bbox.y_min), center_lat)
    }

    /// `(lon, lat)` to local `(x, y)` meters
    pub fn project(&self, p: Point) -> Point {
        Point(
            (p.0 - self.origin.0) * self.lon_to_m,
            (p.1 - self.origin.1) * self.lat_to_m,
        )
    }

    /// Local `(x, y)` meters to `(lon, lat)`
    pub fn unproject(&self, p: Point) -> Point {
        Point(
            self.origin.0 + p.0 / self.lon_to_m,
            self.origin.1 + p.1 / self.lat_to_m,
        )
    }

    /// Converts a distance in meters to `(Δlon, Δlat)` degrees
    pub fn meters_to_degrees(&self, meters: f64) -> (f64, f64) {
        (meters / self.lon_to_m, meters / self.lat_to_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn project_unproject() {
        let proj = LocalProjection::new(
            ProjectionMode::LatitudeCorrected,
            Point(-87.6298, 41.8781),
            41.8781,
        );
        let p = Point(-87.6290, 41.8785);
        let back = proj.unproject(proj.project(p));
        assert!(approx_eq!(f64, back.0, p.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, back.1, p.1, epsilon = 1e-12));
    }

    #[test]
    fn longitude_scale_shrinks_with_latitude() {
        let equator = LocalProjection::new(ProjectionMode::LatitudeCorrected, Point(0.0, 0.0), 0.0);
        let north = LocalProjection::new(ProjectionMode::LatitudeCorrected, Point(0.0, 0.0), 60.0);
        assert!(approx_eq!(f64, equator.lon_to_m, 111_320.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, north.lon_to_m, 55_660.0, epsilon = 1e-6));
        let (d_lon, d_lat) = north.meters_to_degrees(55_660.0);
        assert!(approx_eq!(f64, d_lon, 1.0, epsilon = 1e-9));
        assert!(d_lat < 1.0);
    }
}
