use serde::{Deserialize, Serialize};

use crate::entities::{Stall, StallDims};
use crate::geometry::geo_enums::{Axis, Facing};
use crate::geometry::primitives::{Point, Rect};
use crate::packing::{Proposal, SCAN_TOLERANCE, StallSource};

/// Shape of the stalls placed in a band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BandStall {
    Perpendicular,
    /// Parallelogram stalls leaning at `angle_deg` from the aisle
    Angled { angle_deg: f64 },
}

/// Scan-line tiling in bands of stalls separated by aisles.
///
/// Bands are stacked from the bounding box minimum. Even bands open towards the aisle after
/// them, odd bands towards the aisle before them, so every aisle is double-loaded and bands
/// `2k+1` and `2k+2` stand back to back. Within a band stalls are placed from the minimum up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScan {
    pub axis: Axis,
    pub stall: BandStall,
}

/// Footprint of a band stall in the band frame.
#[derive(Clone, Copy, Debug)]
struct BandGeometry {
    /// Distance between consecutive stalls along the band
    pitch: f64,
    /// Extent of the band across
    depth: f64,
    /// Along-band offset of the far edge relative to the near edge
    lean: f64,
}

impl BandScan {
    fn geometry(&self, dims: StallDims) -> BandGeometry {
        match self.stall {
            BandStall::Perpendicular => BandGeometry {
                pitch: dims.width,
                depth: dims.length,
                lean: 0.0,
            },
            BandStall::Angled { angle_deg } => {
                let theta = angle_deg.to_radians();
                BandGeometry {
                    pitch: dims.width / theta.sin(),
                    depth: dims.length * theta.cos(),
                    lean: dims.length * theta.sin(),
                }
            }
        }
    }
}

impl StallSource for BandScan {
    fn propose(&self, bounds: Rect, dims: StallDims) -> Proposal {
        let g = self.geometry(dims);
        if !(g.pitch > 0.0 && g.depth > 0.0 && dims.aisle >= 0.0) {
            return Proposal::empty();
        }
        let axis = self.axis;
        let (u_min, u_max, v_min, v_max) = band_frame(axis, bounds);
        let n_per_band = n_fitting(u_max - u_min - g.lean, g.pitch);

        let candidates = band_offsets(v_min, v_max, g.depth, dims.aisle)
            .enumerate()
            .flat_map(move |(k, v)| {
                let even = k % 2 == 0;
                let facing = band_facing(axis, even);
                //lean direction alternates with the facing
                let (near_shift, far_shift) = match even {
                    true => (0.0, g.lean),
                    false => (g.lean, 0.0),
                };
                (0..n_per_band).map(move |i| {
                    let u = u_min + i as f64 * g.pitch;
                    let uv = [
                        (u + near_shift, v),
                        (u + near_shift + g.pitch, v),
                        (u + far_shift + g.pitch, v + g.depth),
                        (u + far_shift, v + g.depth),
                    ];
                    band_to_stall(axis, uv, facing)
                })
            });

        Proposal::new(Box::new(candidates))
    }
}

/// `(u_min, u_max, v_min, v_max)`: u runs along the bands, v across them
fn band_frame(axis: Axis, r: Rect) -> (f64, f64, f64, f64) {
    match axis {
        Axis::Horizontal => (r.x_min, r.x_max, r.y_min, r.y_max),
        Axis::Vertical => (r.y_min, r.y_max, r.x_min, r.x_max),
    }
}

fn band_facing(axis: Axis, even: bool) -> Facing {
    match (axis, even) {
        (Axis::Horizontal, true) => Facing::Up,
        (Axis::Horizontal, false) => Facing::Down,
        (Axis::Vertical, true) => Facing::Right,
        (Axis::Vertical, false) => Facing::Left,
    }
}

/// Start offsets of the consecutive bands that fit between `v_min` and `v_max`.
/// After an even band comes an aisle, after an odd band the next band follows directly.
pub(crate) fn band_offsets(
    v_min: f64,
    v_max: f64,
    depth: f64,
    aisle: f64,
) -> impl Iterator<Item = f64> {
    (0usize..)
        .map(move |k| v_min + k as f64 * depth + k.div_ceil(2) as f64 * aisle)
        .take_while(move |v| v + depth <= v_max + SCAN_TOLERANCE)
}

/// Number of consecutive intervals of length `pitch` that fit in `span`.
pub(crate) fn n_fitting(span: f64, pitch: f64) -> usize {
    if !(pitch > 0.0) || !(span > -SCAN_TOLERANCE) {
        return 0;
    }
    ((span + SCAN_TOLERANCE) / pitch).floor().max(0.0) as usize
}

/// Maps corners given in the band frame to a stall in the xy-frame, keeping them counterclockwise.
fn band_to_stall(axis: Axis, uv: [(f64, f64); 4], facing: Facing) -> Stall {
    let corners = match axis {
        Axis::Horizontal => uv.map(|(u, v)| Point(u, v)),
        Axis::Vertical => {
            //swapping the axes mirrors the shape, reverse to restore the winding
            let [a, b, c, d] = uv.map(|(u, v)| Point(v, u));
            [d, c, b, a]
        }
    };
    Stall { corners, facing }
}

/// A single straight strip of `n` perpendicular stalls, starting at `u_start` along `axis`
/// and occupying `[v_lo, v_lo + depth]` across.
pub(crate) fn strip(
    axis: Axis,
    u_start: f64,
    u_end: f64,
    v_lo: f64,
    pitch: f64,
    depth: f64,
    facing: Facing,
) -> impl Iterator<Item = Stall> {
    let n = n_fitting(u_end - u_start, pitch);
    (0..n).map(move |i| {
        let u = u_start + i as f64 * pitch;
        let (x_min, y_min, x_max, y_max) = match axis {
            Axis::Horizontal => (u, v_lo, u + pitch, v_lo + depth),
            Axis::Vertical => (v_lo, u, v_lo + depth, u + pitch),
        };
        Stall::from_rect(
            Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            },
            facing,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn band_offsets_alternate_aisles() {
        let offsets = band_offsets(0.0, 30.0, 5.0, 6.0).collect_vec();
        assert_eq!(offsets, vec![0.0, 11.0, 16.0]);
        let offsets = band_offsets(0.0, 50.0, 5.0, 6.0).collect_vec();
        assert_eq!(offsets, vec![0.0, 11.0, 16.0, 27.0, 32.0, 43.0]);
    }

    #[test]
    fn fitting_tolerates_rounding() {
        assert_eq!(n_fitting(50.0 - 1e-9, 2.5), 20);
        assert_eq!(n_fitting(2.4, 2.5), 0);
        assert_eq!(n_fitting(-3.0, 2.5), 0);
        assert_eq!(n_fitting(10.0, 0.0), 0);
    }
}
