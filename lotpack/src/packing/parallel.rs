use crate::entities::StallDims;
use crate::geometry::geo_enums::{Axis, Facing};
use crate::geometry::primitives::Rect;
use crate::packing::bands::strip;
use crate::packing::{Proposal, SCAN_TOLERANCE, StallSource};

/// Curbside stalls along the four edges of the bounding box, long side along the edge.
///
/// The bottom and top strips span the full width, the left and right strips fill the gap between them.
/// A strip is dropped when it would collide with the strip on the opposite edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeScan;

impl StallSource for EdgeScan {
    fn propose(&self, bounds: Rect, dims: StallDims) -> Proposal {
        let StallDims { width, length, .. } = dims;
        if !(width > 0.0 && length > 0.0) {
            return Proposal::empty();
        }
        let Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        } = bounds;
        let room_for_top = bounds.height() + SCAN_TOLERANCE >= 2.0 * width;
        let room_for_right = bounds.width() + SCAN_TOLERANCE >= 2.0 * width;

        let bottom = strip(Axis::Horizontal, x_min, x_max, y_min, length, width, Facing::Up);
        let top = strip(
            Axis::Horizontal,
            x_min,
            x_max,
            y_max - width,
            length,
            width,
            Facing::Down,
        )
        .filter(move |_| room_for_top);
        let left = strip(
            Axis::Vertical,
            y_min + width,
            y_max - width,
            x_min,
            length,
            width,
            Facing::Right,
        );
        let right = strip(
            Axis::Vertical,
            y_min + width,
            y_max - width,
            x_max - width,
            length,
            width,
            Facing::Left,
        )
        .filter(move |_| room_for_right);

        Proposal::new(Box::new(bottom.chain(top).chain(left).chain(right)))
    }
}
