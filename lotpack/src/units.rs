use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::entities::StallDims;

/// Feet per meter, the length conversion constant for imperial display units
pub const FEET_PER_METER: f64 = 3.28084;
/// Square feet per square meter
pub const SQ_FEET_PER_SQ_METER: f64 = 10.764;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Display units per meter
    pub fn length_conversion(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => FEET_PER_METER,
        }
    }

    pub fn to_meters(&self, value: f64) -> f64 {
        value / self.length_conversion()
    }

    pub fn from_meters(&self, meters: f64) -> f64 {
        meters * self.length_conversion()
    }

    pub fn area_to_sq_meters(&self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value / SQ_FEET_PER_SQ_METER,
        }
    }

    pub fn area_from_sq_meters(&self, sq_meters: f64) -> f64 {
        match self {
            UnitSystem::Metric => sq_meters,
            UnitSystem::Imperial => sq_meters * SQ_FEET_PER_SQ_METER,
        }
    }

    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "m" | "meters" => Ok(UnitSystem::Metric),
            "imperial" | "ft" | "feet" => Ok(UnitSystem::Imperial),
            _ => bail!("unknown unit system: {s}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingType {
    /// Standard 90° stalls
    #[default]
    Perpendicular,
    /// 45° stalls
    Angled,
    Parallel,
    Compact,
}

impl ParkingType {
    pub const ALL: [ParkingType; 4] = [
        ParkingType::Perpendicular,
        ParkingType::Angled,
        ParkingType::Parallel,
        ParkingType::Compact,
    ];

    /// Fraction of the gross area usable for stalls after circulation and landscaping
    pub fn default_efficiency(&self) -> f64 {
        match self {
            ParkingType::Perpendicular => 0.85,
            ParkingType::Angled => 0.80,
            ParkingType::Parallel => 0.65,
            ParkingType::Compact => 0.87,
        }
    }
}

impl Display for ParkingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ParkingType::Perpendicular => "Standard Perpendicular (90°)",
            ParkingType::Angled => "Angled (45°)",
            ParkingType::Parallel => "Parallel",
            ParkingType::Compact => "Compact",
        };
        write!(f, "{label}")
    }
}

impl FromStr for ParkingType {
    type Err = anyhow::Error;

    /// Accepts both the snake case names and the display labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(pt) = ParkingType::ALL.into_iter().find(|pt| pt.to_string() == s) {
            return Ok(pt);
        }
        match s.to_lowercase().as_str() {
            "perpendicular" | "standard" => Ok(ParkingType::Perpendicular),
            "angled" => Ok(ParkingType::Angled),
            "parallel" => Ok(ParkingType::Parallel),
            "compact" => Ok(ParkingType::Compact),
            _ => bail!("unknown parking type: {s}"),
        }
    }
}

/// Default value of a numeric input together with the range the UI allows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounded {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounded {
    const fn new(default: f64, min: f64, max: f64, step: f64) -> Self {
        Bounded {
            default,
            min,
            max,
            step,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Default stall dimensions for a parking type, in display units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionPreset {
    pub unit_system: UnitSystem,
    pub parking_type: ParkingType,
    pub width: Bounded,
    pub length: Bounded,
    pub aisle: Bounded,
    pub efficiency: f64,
}

impl DimensionPreset {
    /// Default dimensions converted to meters
    pub fn default_dims(&self) -> StallDims {
        self.dims_in_meters(None, None, None)
    }

    /// Dimensions in meters from (optional) user values in display units.
    /// Missing values take the preset default, present values are clamped to the allowed range.
    pub fn dims_in_meters(
        &self,
        width: Option<f64>,
        length: Option<f64>,
        aisle: Option<f64>,
    ) -> StallDims {
        let resolve = |b: &Bounded, v: Option<f64>| {
            self.unit_system
                .to_meters(v.map_or(b.default, |v| b.clamp(v)))
        };
        StallDims {
            width: resolve(&self.width, width),
            length: resolve(&self.length, length),
            aisle: resolve(&self.aisle, aisle),
        }
    }
}

/// Resolves the dimension preset for a parking type in the given unit system.
pub fn resolve(unit_system: UnitSystem, parking_type: ParkingType) -> DimensionPreset {
    use ParkingType::*;
    use UnitSystem::*;

    let (width, length, aisle) = match (unit_system, parking_type) {
        (Metric, Perpendicular) => (
            Bounded::new(2.5, 2.0, 3.5, 0.1),
            Bounded::new(5.0, 4.5, 6.0, 0.1),
            Bounded::new(6.0, 5.0, 8.0, 0.5),
        ),
        (Metric, Angled) => (
            Bounded::new(2.5, 2.0, 3.5, 0.1),
            Bounded::new(5.5, 5.0, 6.5, 0.1),
            Bounded::new(4.0, 3.5, 6.0, 0.5),
        ),
        (Metric, Parallel) => (
            Bounded::new(2.5, 2.0, 3.0, 0.1),
            Bounded::new(6.5, 6.0, 8.0, 0.1),
            Bounded::new(3.5, 3.0, 5.0, 0.5),
        ),
        (Metric, Compact) => (
            Bounded::new(2.3, 2.0, 2.8, 0.1),
            Bounded::new(4.5, 4.0, 5.5, 0.1),
            Bounded::new(5.5, 5.0, 7.0, 0.5),
        ),
        (Imperial, Perpendicular) => (
            Bounded::new(9.0, 7.5, 11.5, 0.5),
            Bounded::new(18.0, 15.0, 20.0, 0.5),
            Bounded::new(24.0, 16.0, 26.0, 1.0),
        ),
        (Imperial, Angled) => (
            Bounded::new(9.0, 7.5, 11.5, 0.5),
            Bounded::new(18.0, 16.0, 21.0, 0.5),
            Bounded::new(13.0, 11.0, 20.0, 1.0),
        ),
        (Imperial, Parallel) => (
            Bounded::new(8.0, 7.0, 10.0, 0.5),
            Bounded::new(22.0, 20.0, 26.0, 0.5),
            Bounded::new(12.0, 10.0, 16.0, 1.0),
        ),
        (Imperial, Compact) => (
            Bounded::new(7.5, 7.0, 9.0, 0.5),
            Bounded::new(15.0, 13.0, 18.0, 0.5),
            Bounded::new(18.0, 16.0, 23.0, 1.0),
        ),
    };

    DimensionPreset {
        unit_system,
        parking_type,
        width,
        length,
        aisle,
        efficiency: parking_type.default_efficiency(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test_case(2.5; "stall width")]
    #[test_case(6.0; "aisle")]
    #[test_case(1234.567; "large")]
    fn length_round_trip(meters: f64) {
        let ft = UnitSystem::Imperial.from_meters(meters);
        assert!(approx_eq!(f64, UnitSystem::Imperial.to_meters(ft), meters, epsilon = 1e-6));
    }

    #[test]
    fn area_round_trip() {
        let m2 = 1500.0;
        let ft2 = UnitSystem::Imperial.area_from_sq_meters(m2);
        assert!(approx_eq!(f64, ft2, 16146.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, UnitSystem::Imperial.area_to_sq_meters(ft2), m2, epsilon = 1e-6));
    }

    #[test]
    fn metric_presets_are_in_meters() {
        let preset = resolve(UnitSystem::Metric, ParkingType::Perpendicular);
        assert_eq!(
            preset.default_dims(),
            StallDims {
                width: 2.5,
                length: 5.0,
                aisle: 6.0
            }
        );
        assert_eq!(preset.efficiency, 0.85);
    }

    #[test]
    fn imperial_presets_convert_to_meters() {
        let preset = resolve(UnitSystem::Imperial, ParkingType::Perpendicular);
        let dims = preset.default_dims();
        assert!(approx_eq!(f64, dims.width, 9.0 / FEET_PER_METER, epsilon = 1e-12));
        assert!(approx_eq!(f64, dims.aisle, 24.0 / FEET_PER_METER, epsilon = 1e-12));
    }

    #[test]
    fn user_values_are_clamped() {
        let preset = resolve(UnitSystem::Metric, ParkingType::Compact);
        let dims = preset.dims_in_meters(Some(10.0), None, Some(1.0));
        assert_eq!(dims.width, 2.8);
        assert_eq!(dims.length, 4.5);
        assert_eq!(dims.aisle, 5.0);
    }

    #[test]
    fn parking_type_from_label() {
        for pt in ParkingType::ALL {
            assert_eq!(pt.to_string().parse::<ParkingType>().unwrap(), pt);
        }
        assert_eq!("parallel".parse::<ParkingType>().unwrap(), ParkingType::Parallel);
        assert!("diagonal".parse::<ParkingType>().is_err());
    }
}
