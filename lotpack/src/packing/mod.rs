use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thousands::Separable;

use crate::entities::{Layout, LayoutWarning, Lot, Stall, StallDims};
use crate::geometry::geo_enums::Axis;
use crate::geometry::primitives::{Rect, SPolygon};
use crate::util::assertions;

mod bands;
mod filter;
mod parallel;
mod perimeter;

pub use bands::{BandScan, BandStall};
pub use filter::{CentroidInside, CombinedFilter, OutsideZones, StallFilter};
pub use parallel::EdgeScan;
pub use perimeter::{MAX_CENTER_ROWS, PerimeterConfig};

/// Tolerance (in meters) with which a stall may exceed the bounding box edge, absorbs rounding in the scan.
pub const SCAN_TOLERANCE: f64 = 1e-6;

/// Default lean angle of angled stalls, in degrees
pub const DEFAULT_ANGLE_DEG: f64 = 45.0;

/// How stalls are arranged inside the lot
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Horizontal bands of stalls, stacked bottom to top
    #[default]
    RowBased,
    /// Vertical bands of stalls, stacked left to right
    ColumnBased,
    /// Bands of parallelogram stalls
    Angled { axis: Axis, angle_deg: f64 },
    /// Curbside stalls along the edges of the bounding box
    Parallel,
    /// Inward-facing perimeter strips with double-loaded rows in the center
    PerimeterCenter(PerimeterConfig),
}

/// Candidates proposed by a [`StallSource`], before any acceptance test
pub struct Proposal {
    pub candidates: Box<dyn Iterator<Item = Stall>>,
    /// Zones in which no stall may be placed
    pub islands: Vec<Rect>,
    pub warnings: Vec<LayoutWarning>,
}

impl Proposal {
    pub fn new(candidates: Box<dyn Iterator<Item = Stall>>) -> Self {
        Proposal {
            candidates,
            islands: vec![],
            warnings: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::new(Box::new(std::iter::empty()))
    }
}

/// A generator of candidate stalls covering a bounding box, in a fixed scan order.
pub trait StallSource {
    fn propose(&self, bounds: Rect, dims: StallDims) -> Proposal;
}

impl StallSource for LayoutStrategy {
    fn propose(&self, bounds: Rect, dims: StallDims) -> Proposal {
        match *self {
            LayoutStrategy::RowBased => BandScan {
                axis: Axis::Horizontal,
                stall: BandStall::Perpendicular,
            }
            .propose(bounds, dims),
            LayoutStrategy::ColumnBased => BandScan {
                axis: Axis::Vertical,
                stall: BandStall::Perpendicular,
            }
            .propose(bounds, dims),
            LayoutStrategy::Angled { axis, angle_deg } => BandScan {
                axis,
                stall: BandStall::Angled { angle_deg },
            }
            .propose(bounds, dims),
            LayoutStrategy::Parallel => EdgeScan.propose(bounds, dims),
            LayoutStrategy::PerimeterCenter(config) => config.propose(bounds, dims),
        }
    }
}

/// Everything the packer needs besides the boundary
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackConfig {
    pub dims: StallDims,
    pub strategy: LayoutStrategy,
    /// Stop after this many accepted stalls
    pub max_count: Option<usize>,
}

/// Lazily accepted stalls of a packing run, in scan order.
/// The corner zones and warnings of the run are known up front.
pub struct StallIter<'a> {
    pub islands: Vec<Rect>,
    pub warnings: Vec<LayoutWarning>,
    accepted: Box<dyn Iterator<Item = Stall> + 'a>,
}

impl Iterator for StallIter<'_> {
    type Item = Stall;

    fn next(&mut self) -> Option<Stall> {
        self.accepted.next()
    }
}

/// Starts a packing run over `boundary` (in local meters).
/// No candidate is generated before it is requested, so a capped run stops scanning early.
pub fn stalls<'a>(boundary: &'a SPolygon, config: &PackConfig) -> StallIter<'a> {
    let Proposal {
        candidates,
        islands,
        warnings,
    } = config.strategy.propose(boundary.bbox, config.dims);

    let filter = CombinedFilter(CentroidInside(boundary), OutsideZones(islands.clone()));
    let limit = config.max_count.unwrap_or(usize::MAX);

    StallIter {
        islands,
        warnings,
        accepted: Box::new(candidates.filter(move |s| filter.accepts(s)).take(limit)),
    }
}

/// Packs stalls into `boundary` (in local meters).
pub fn pack(boundary: &SPolygon, config: &PackConfig) -> Layout {
    let start = Instant::now();
    let mut run = stalls(boundary, config);
    let stalls = run.by_ref().collect_vec();

    debug_assert!(assertions::stalls_disjoint(&stalls));
    debug_assert!(assertions::centroids_inside(&stalls, boundary));
    debug_assert!(assertions::zones_untouched(&stalls, &run.islands));

    let show_islands = matches!(config.strategy, LayoutStrategy::PerimeterCenter(c) if c.show_islands);

    info!(
        "[PACK] {} stalls placed ({:?}) in {:.3}ms",
        stalls.len().separate_with_commas(),
        config.strategy,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Layout {
        stalls,
        islands: run.islands,
        show_islands,
        warnings: run.warnings,
    }
}

/// Packs stalls into a drawn lot. The layout is expressed in the local meters of the lot,
/// see [`crate::io::export`] for converting it back to `(lon, lat)`.
pub fn pack_lot(lot: &Lot, config: &PackConfig) -> Layout {
    match &lot.boundary {
        None => {
            warn!("[PACK] {}", LayoutWarning::DegenerateBoundary);
            Layout {
                warnings: vec![LayoutWarning::DegenerateBoundary],
                ..Layout::default()
            }
        }
        Some(boundary) => {
            let (d_lon, d_lat) = lot.projection.meters_to_degrees(config.dims.width);
            debug!(
                "[PACK] lot of {:.1}m², stall width {:.2}m = ({d_lon:.3e}°, {d_lat:.3e}°)",
                lot.area_m2(),
                config.dims.width
            );
            pack(boundary, config)
        }
    }
}
