use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entities::DimensionSet;
use crate::extrude::StructureType;

/// Gross area per stall (m², roughly 325 ft²) used whenever the configured ratio would divide by zero
pub const DEFAULT_AREA_PER_SPACE: f64 = 30.0;

/// How the planning-level stall count is derived from the lot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcMethod {
    /// `area * efficiency / stall_area`
    #[default]
    EfficiencyFactor,
    /// `area / area_per_space`, after ITE planning guidance
    IteAreaPerSpace,
}

/// Outcome of a capacity estimate. Read-only once computed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub area_m2: f64,
    pub estimated_spaces_per_level: u64,
    pub estimated_spaces: u64,
    pub dimensions: DimensionSet,
    pub method: CalcMethod,
    pub structure: StructureType,
    pub levels: usize,
}

impl CalculationResult {
    /// Estimated stalls per 100 m² of lot area
    pub fn density(&self) -> f64 {
        density_per_100m2(self.estimated_spaces_per_level, self.area_m2)
    }
}

/// Planning-level number of stalls on a single level.
///
/// Only the integer floor is taken; a zero stall area or area per space falls back to
/// [`DEFAULT_AREA_PER_SPACE`] instead of dividing by zero.
pub fn spaces_per_level(area_m2: f64, dims: &DimensionSet, method: CalcMethod) -> u64 {
    let raw = match method {
        CalcMethod::EfficiencyFactor => {
            let stall_area = dims.dims.stall_area();
            if stall_area > 0.0 {
                area_m2 * dims.efficiency / stall_area
            } else {
                warn!("[EST] stall area is zero, falling back to {DEFAULT_AREA_PER_SPACE} m² per space");
                area_m2 / DEFAULT_AREA_PER_SPACE
            }
        }
        CalcMethod::IteAreaPerSpace => {
            if dims.area_per_space > 0.0 {
                area_m2 / dims.area_per_space
            } else {
                warn!("[EST] area per space is zero, falling back to {DEFAULT_AREA_PER_SPACE} m² per space");
                area_m2 / DEFAULT_AREA_PER_SPACE
            }
        }
    };
    //float to int casts saturate, NaN maps to 0
    raw.floor().max(0.0) as u64
}

/// Estimates the capacity of a lot of `area_m2` for the given structure.
pub fn estimate(
    area_m2: f64,
    dimensions: DimensionSet,
    method: CalcMethod,
    structure: StructureType,
    levels: usize,
) -> CalculationResult {
    let levels = structure.effective_levels(levels);
    let per_level = spaces_per_level(area_m2, &dimensions, method);
    let result = CalculationResult {
        area_m2,
        estimated_spaces_per_level: per_level,
        estimated_spaces: per_level * levels as u64,
        dimensions,
        method,
        structure,
        levels,
    };
    debug!(
        "[EST] {:.1} m² -> {} spaces/level x {} level(s) ({:?})",
        area_m2, per_level, levels, method
    );
    result
}

/// Stalls per 100 m², 0 for a lot without area
pub fn density_per_100m2(spaces: u64, area_m2: f64) -> f64 {
    match area_m2 > 0.0 {
        true => spaces as f64 / area_m2 * 100.0,
        false => 0.0,
    }
}

/// Difference between an actually packed layout and the planning estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapacityDelta {
    pub packed: u64,
    pub estimated: u64,
    /// `packed - estimated`
    pub delta: i64,
    /// Delta as a percentage of the estimate, 0 when the estimate is 0
    pub delta_pct: f64,
}

impl CapacityDelta {
    pub fn new(packed: u64, estimated: u64) -> Self {
        let delta = packed as i64 - estimated as i64;
        let delta_pct = match estimated {
            0 => 0.0,
            e => delta as f64 / e as f64 * 100.0,
        };
        CapacityDelta {
            packed,
            estimated,
            delta,
            delta_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StallDims;

    const STANDARD: StallDims = StallDims {
        width: 2.5,
        length: 5.0,
        aisle: 6.0,
    };

    #[test]
    fn efficiency_method() {
        let dims = DimensionSet::from_efficiency(STANDARD, 0.85);
        assert_eq!(spaces_per_level(1000.0, &dims, CalcMethod::EfficiencyFactor), 68);
    }

    #[test]
    fn ite_method() {
        let dims = DimensionSet::from_area_per_space(STANDARD, 30.0);
        assert_eq!(spaces_per_level(1000.0, &dims, CalcMethod::IteAreaPerSpace), 33);
        assert!((dims.efficiency - 12.5 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn zero_ratios_fall_back_to_default() {
        let zero = StallDims {
            width: 0.0,
            length: 5.0,
            aisle: 6.0,
        };
        let dims = DimensionSet::from_efficiency(zero, 0.85);
        assert_eq!(spaces_per_level(900.0, &dims, CalcMethod::EfficiencyFactor), 30);
        let dims = DimensionSet::from_area_per_space(STANDARD, 0.0);
        assert_eq!(spaces_per_level(900.0, &dims, CalcMethod::IteAreaPerSpace), 30);
    }

    #[test]
    fn levels_multiply() {
        let dims = DimensionSet::from_efficiency(STANDARD, 0.85);
        let res = estimate(1000.0, dims, CalcMethod::EfficiencyFactor, StructureType::Aboveground, 4);
        assert_eq!(res.estimated_spaces, 272);
        let res = estimate(1000.0, dims, CalcMethod::EfficiencyFactor, StructureType::Surface, 4);
        assert_eq!(res.levels, 1);
        assert_eq!(res.estimated_spaces, 68);
    }

    #[test]
    fn guards_against_zero_denominators() {
        assert_eq!(density_per_100m2(10, 0.0), 0.0);
        assert_eq!(CapacityDelta::new(12, 0).delta_pct, 0.0);
        let d = CapacityDelta::new(45, 50);
        assert_eq!(d.delta, -5);
        assert!((d.delta_pct + 10.0).abs() < 1e-12);
    }
}
