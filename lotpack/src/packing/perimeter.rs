use log::warn;
use serde::{Deserialize, Serialize};

use crate::entities::{LayoutWarning, Stall, StallDims};
use crate::geometry::geo_enums::{Axis, Facing};
use crate::geometry::primitives::Rect;
use crate::packing::bands::strip;
use crate::packing::{Proposal, SCAN_TOLERANCE, StallSource};

/// Maximum number of double-loaded rows in the center zone
pub const MAX_CENTER_ROWS: usize = 3;

/// Configuration of the perimeter + center layout
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerimeterConfig {
    /// Side of the square exclusion zone in each corner of the bounding box (in meters)
    pub corner_island_size: f64,
    /// Number of double-loaded rows in the center, clamped to [`MAX_CENTER_ROWS`]
    pub center_rows: usize,
    /// Whether the corner zones are drawn as landscaped islands
    pub show_islands: bool,
}

impl Default for PerimeterConfig {
    fn default() -> Self {
        Self {
            corner_island_size: 10.0,
            center_rows: 2,
            show_islands: true,
        }
    }
}

impl PerimeterConfig {
    /// Square exclusion zones in the four corners of `bounds`. Empty if the size is not positive.
    pub fn corner_zones(&self, bounds: Rect) -> Vec<Rect> {
        let c = self.corner_island_size;
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = bounds;
        [
            (x_min, y_min, x_min + c, y_min + c),
            (x_max - c, y_min, x_max, y_min + c),
            (x_max - c, y_max - c, x_max, y_max),
            (x_min, y_max - c, x_min + c, y_max),
        ]
        .into_iter()
        .filter_map(|(x0, y0, x1, y1)| Rect::try_new(x0, y0, x1, y1).ok())
        .collect()
    }

    /// Lower edges of the bands in the center zone, or a warning if the requested rows do not fit.
    fn center_bands(
        &self,
        b: Rect,
        dims: StallDims,
    ) -> (Option<Rect>, Vec<(f64, Facing)>, Option<LayoutWarning>) {
        let StallDims {
            length: l,
            aisle: a,
            ..
        } = dims;
        let rows = self.center_rows.min(MAX_CENTER_ROWS);
        if rows == 0 {
            return (None, vec![], None);
        }
        let inset = l + 2.0 * a;
        let center = b.resize_by(-inset, -inset);
        let available = center.map_or(0.0, |c| c.height());
        let required = rows as f64 * (2.0 * l + a) + (rows - 1) as f64 * a;

        match center {
            Some(center) if available + SCAN_TOLERANCE >= required => {
                let mid = center.centroid().y();
                let pitch = 2.0 * l + 2.0 * a;
                let bands = (0..rows)
                    .flat_map(|i| {
                        let row_mid = mid + (i as f64 - (rows - 1) as f64 / 2.0) * pitch;
                        [
                            (row_mid - a / 2.0 - l, Facing::Up),
                            (row_mid + a / 2.0, Facing::Down),
                        ]
                    })
                    .collect();
                (Some(center), bands, None)
            }
            _ => {
                let warning = LayoutWarning::InsufficientCenterSpace {
                    rows,
                    available,
                    required,
                };
                warn!("[PACK] {warning}");
                (center, vec![], Some(warning))
            }
        }
    }
}

/// Inward facing strips along the four edges, inset by one aisle.
fn perimeter_strips(b: Rect, dims: StallDims) -> impl Iterator<Item = Stall> {
    let StallDims {
        width: w,
        length: l,
        aisle: a,
    } = dims;
    let inset = a + l;
    let room_for_top = b.height() + SCAN_TOLERANCE >= 2.0 * inset;
    let room_for_right = b.width() + SCAN_TOLERANCE >= 2.0 * inset;

    let bottom = strip(
        Axis::Horizontal,
        b.x_min + a,
        b.x_max - a,
        b.y_min + a,
        w,
        l,
        Facing::Up,
    );
    let top = strip(
        Axis::Horizontal,
        b.x_min + a,
        b.x_max - a,
        b.y_max - inset,
        w,
        l,
        Facing::Down,
    )
    .filter(move |_| room_for_top);
    let left = strip(
        Axis::Vertical,
        b.y_min + inset,
        b.y_max - inset,
        b.x_min + a,
        w,
        l,
        Facing::Right,
    );
    let right = strip(
        Axis::Vertical,
        b.y_min + inset,
        b.y_max - inset,
        b.x_max - inset,
        w,
        l,
        Facing::Left,
    )
    .filter(move |_| room_for_right);

    bottom.chain(top).chain(left).chain(right)
}

impl StallSource for PerimeterConfig {
    fn propose(&self, bounds: Rect, dims: StallDims) -> Proposal {
        if !(dims.width > 0.0 && dims.length > 0.0 && dims.aisle >= 0.0) {
            return Proposal::empty();
        }
        let perimeter = perimeter_strips(bounds, dims);
        let (center, bands, warning) = self.center_bands(bounds, dims);
        let StallDims {
            width: w,
            length: l,
            ..
        } = dims;
        let center_stalls = center.into_iter().flat_map(move |c| {
            bands
                .clone()
                .into_iter()
                .flat_map(move |(v_lo, facing)| {
                    strip(Axis::Horizontal, c.x_min, c.x_max, v_lo, w, l, facing)
                })
        });

        Proposal {
            candidates: Box::new(perimeter.chain(center_stalls)),
            islands: self.corner_zones(bounds),
            warnings: warning.into_iter().collect(),
        }
    }
}
