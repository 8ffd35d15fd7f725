use crate::entities::Stall;
use crate::geometry::geo_traits::{CollidesWith, Overlaps, Shape};
use crate::geometry::primitives::{Rect, SPolygon};

/// Trait that allows for ignoring out specific candidate stalls during packing.
pub trait StallFilter {
    /// Returns true if the candidate should be kept.
    fn accepts(&self, stall: &Stall) -> bool;
}

/// Keeps stalls whose centroid lies inside the lot boundary.
///
/// Only the centroid is tested, a kept stall may partially protrude outside the boundary.
#[derive(Clone, Copy, Debug)]
pub struct CentroidInside<'a>(pub &'a SPolygon);

impl StallFilter for CentroidInside<'_> {
    fn accepts(&self, stall: &Stall) -> bool {
        self.0.collides_with(&stall.centroid())
    }
}

/// Rejects stalls that overlap any of the exclusion zones or have their centroid in one.
#[derive(Clone, Debug)]
pub struct OutsideZones(pub Vec<Rect>);

impl StallFilter for OutsideZones {
    fn accepts(&self, stall: &Stall) -> bool {
        let centroid = stall.centroid();
        self.0
            .iter()
            .all(|zone| !stall.overlaps(zone) && !zone.collides_with(&centroid))
    }
}

/// Combines two filters, a stall is kept only if both keep it.
#[derive(Clone, Debug)]
pub struct CombinedFilter<A, B>(pub A, pub B);

impl<A: StallFilter, B: StallFilter> StallFilter for CombinedFilter<A, B> {
    fn accepts(&self, stall: &Stall) -> bool {
        self.0.accepts(stall) && self.1.accepts(stall)
    }
}
