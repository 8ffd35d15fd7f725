use itertools::Itertools;
use log::error;
use ordered_float::OrderedFloat;

use crate::entities::Stall;
use crate::geometry::geo_traits::{CollidesWith, Overlaps, Shape};
use crate::geometry::primitives::{Rect, SPolygon};
//Various checks to verify correctness of a packed layout
//Used in debug_assertion!() blocks

/// No two stalls overlap with positive area.
/// Sweeps over the stalls sorted by the left edge of their bounding box.
pub fn stalls_disjoint(stalls: &[Stall]) -> bool {
    let bboxes = stalls.iter().map(|s| s.bbox()).collect_vec();
    let order = (0..stalls.len())
        .sorted_by_key(|&i| OrderedFloat(bboxes[i].x_min))
        .collect_vec();

    for (k, &i) in order.iter().enumerate() {
        for &j in order[k + 1..].iter() {
            if bboxes[j].x_min >= bboxes[i].x_max {
                break;
            }
            if stalls[i].overlaps(&stalls[j]) {
                error!(
                    "stalls {i} and {j} overlap: {:?} and {:?}",
                    stalls[i].corners, stalls[j].corners
                );
                return false;
            }
        }
    }
    true
}

pub fn centroids_inside(stalls: &[Stall], boundary: &SPolygon) -> bool {
    match stalls
        .iter()
        .position(|s| !boundary.collides_with(&s.centroid()))
    {
        Some(i) => {
            error!("centroid of stall {i} lies outside the boundary");
            false
        }
        None => true,
    }
}

/// No stall overlaps, or has its centroid inside, one of the exclusion zones
pub fn zones_untouched(stalls: &[Stall], zones: &[Rect]) -> bool {
    for (i, s) in stalls.iter().enumerate() {
        let centroid = s.centroid();
        if let Some(zone) = zones
            .iter()
            .find(|z| s.overlaps(*z) || z.collides_with(&centroid))
        {
            error!("stall {i} intrudes into exclusion zone {zone:?}");
            return false;
        }
    }
    true
}
