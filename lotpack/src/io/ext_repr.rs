use serde::{Deserialize, Serialize};

use crate::entities::LayoutWarning;
use crate::geometry::geo_enums::Facing;

/// A ring of `[lon, lat]` (or `[x, y]`) coordinates.
/// Rings written by the library are closed, rings read by it may be open or closed.
pub type ExtRing = Vec<[f64; 2]>;

/// External representation of a [`Lot`](crate::entities::Lot), as drawn on the map
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLot {
    pub ring: ExtRing,
}

/// External representation of a [`Stall`](crate::entities::Stall)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtStall {
    pub ring: ExtRing,
    pub facing: Facing,
}

/// External representation of a [`Layout`](crate::entities::Layout), in `[lon, lat]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ExtLayout {
    pub stalls: Vec<ExtStall>,
    /// Corner islands, only present if they should be displayed
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub islands: Vec<ExtRing>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<LayoutWarning>,
}

/// External representation of a [`LevelLayer`](crate::extrude::LevelLayer)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLevel {
    pub index: usize,
    pub elevation: f64,
    pub color: String,
    pub opacity: f64,
    pub stalls: Vec<ExtRing>,
}
