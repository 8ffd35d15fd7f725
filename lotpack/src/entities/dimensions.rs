use serde::{Deserialize, Serialize};

/// Physical dimensions of a single stall and the aisle serving it, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StallDims {
    /// Width of a stall, measured perpendicular to its long axis
    pub width: f64,
    /// Length (depth) of a stall along its long axis
    pub length: f64,
    /// Width of the driving aisle
    pub aisle: f64,
}

impl StallDims {
    pub fn stall_area(&self) -> f64 {
        self.width * self.length
    }
}

/// Stall dimensions together with the planning ratios used by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionSet {
    pub dims: StallDims,
    /// Fraction of the gross lot area usable for stalls
    pub efficiency: f64,
    /// Gross lot area consumed per stall (m²), including its share of circulation
    pub area_per_space: f64,
}

impl DimensionSet {
    /// Dimension set for the efficiency-factor method.
    /// The area per space follows from the stall area and the efficiency.
    pub fn from_efficiency(dims: StallDims, efficiency: f64) -> Self {
        let area_per_space = match efficiency > 0.0 {
            true => dims.stall_area() / efficiency,
            false => 0.0,
        };
        DimensionSet {
            dims,
            efficiency,
            area_per_space,
        }
    }

    /// Dimension set for the ITE area-per-space method.
    /// The efficiency is back-derived as the ratio of stall area to area per space.
    pub fn from_area_per_space(dims: StallDims, area_per_space: f64) -> Self {
        let efficiency = match area_per_space > 0.0 {
            true => dims.stall_area() / area_per_space,
            false => 0.0,
        };
        DimensionSet {
            dims,
            efficiency,
            area_per_space,
        }
    }
}
