use itertools::Itertools;

use crate::entities::{Layout, Lot, Stall};
use crate::extrude::Extrusion;
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtLayout, ExtLevel, ExtRing, ExtStall};

pub fn export_ring(points: impl IntoIterator<Item = Point>) -> ExtRing {
    points.into_iter().map(|p| [p.0, p.1]).collect_vec()
}

/// Moves the stalls of a layout from the local meters of `lot` back to `(lon, lat)`
pub fn geo_stalls(layout: &Layout, lot: &Lot) -> Vec<Stall> {
    layout
        .stalls
        .iter()
        .map(|s| s.map_corners(|p| lot.to_geo(p)))
        .collect_vec()
}

/// Exports a [`Layout`] packed in the local frame of `lot` as `[lon, lat]` rings.
pub fn export_layout(layout: &Layout, lot: &Lot) -> ExtLayout {
    let stalls = geo_stalls(layout, lot)
        .into_iter()
        .map(|s| ExtStall {
            ring: export_ring(s.ring()),
            facing: s.facing,
        })
        .collect_vec();

    let islands = match layout.show_islands {
        true => layout
            .islands
            .iter()
            .map(|r| {
                //closed, counterclockwise from the bottom left
                let [tr, tl, bl, br] = r.corners();
                export_ring([bl, br, tr, tl, bl].map(|p| lot.to_geo(p)))
            })
            .collect_vec(),
        false => vec![],
    };

    ExtLayout {
        stalls,
        islands,
        warnings: layout.warnings.clone(),
    }
}

pub fn export_levels(extrusion: &Extrusion) -> Vec<ExtLevel> {
    extrusion
        .levels
        .iter()
        .map(|l| ExtLevel {
            index: l.index,
            elevation: l.elevation,
            color: l.color.to_string(),
            opacity: l.opacity,
            stalls: l.rings.iter().map(|r| export_ring(*r)).collect_vec(),
        })
        .collect_vec()
}
