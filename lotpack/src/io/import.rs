use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::entities::Lot;
use crate::geometry::ProjectionMode;
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtLot, ExtRing};

/// Converts an external ring into points, rejecting non-finite coordinates.
pub fn import_ring(ring: &ExtRing) -> Result<Vec<Point>> {
    ensure!(
        ring.iter().flatten().all(|c| c.is_finite()),
        "ring contains non-finite coordinates"
    );
    Ok(ring.iter().map(|&c| Point::from(c)).collect_vec())
}

/// Imports a drawn lot. Only malformed coordinates are an error,
/// a ring with too few vertices yields a lot without a boundary.
pub fn import_lot(ext_lot: &ExtLot, mode: ProjectionMode) -> Result<Lot> {
    let ring = import_ring(&ext_lot.ring)?;
    Ok(Lot::new(ring, mode))
}
