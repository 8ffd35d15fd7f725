use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lotpack::estimate::{CalcMethod, DEFAULT_AREA_PER_SPACE};
use lotpack::extrude::{DisplayMode, LevelConfig};
use lotpack::geometry::ProjectionMode;
use lotpack::io::svg::SvgDrawOptions;
use lotpack::packing::PerimeterConfig;
use lotpack::units::{ParkingType, UnitSystem};

use crate::services::basemap::Basemap;
use crate::services::geocode::GeocoderConfig;

/// How the stalls of a layout are organised
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOrientation {
    /// Rows of stalls along the x-axis
    #[default]
    Rows,
    /// Columns of stalls along the y-axis
    Columns,
    /// Stalls along the perimeter and double-loaded rows in the center
    PerimeterCenter,
}

/// Whether the packed layout is allowed to exceed the planning estimate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Stop packing once the estimated number of stalls is reached
    Conservative,
    /// Pack as many stalls as fit
    #[default]
    Optimized,
}

/// Configuration of a planning session
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LotConfig {
    pub unit_system: UnitSystem,
    pub parking_type: ParkingType,
    /// Stall width in display units. Preset default if undefined, clamped to the preset range otherwise
    pub stall_width: Option<f64>,
    /// Stall length in display units
    pub stall_length: Option<f64>,
    /// Aisle width in display units
    pub aisle_width: Option<f64>,
    /// Efficiency factor overriding the parking type's default
    pub efficiency: Option<f64>,
    pub calc_method: CalcMethod,
    /// Gross area per space (m²) for the ITE method
    pub area_per_space: f64,
    pub orientation: LayoutOrientation,
    pub perimeter: PerimeterConfig,
    pub fill_mode: FillMode,
    pub levels: LevelConfig,
    pub display_mode: DisplayMode,
    pub projection: ProjectionMode,
    pub basemap: Basemap,
    pub geocoder: GeocoderConfig,
    /// Timeout of a single basemap availability check
    pub probe_timeout_secs: u64,
    /// Disables TLS certificate verification for all outgoing requests (e.g. behind an intercepting proxy)
    pub accept_invalid_certs: bool,
    /// Append-only operational log
    pub log_file: PathBuf,
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            parking_type: ParkingType::Perpendicular,
            stall_width: None,
            stall_length: None,
            aisle_width: None,
            efficiency: None,
            calc_method: CalcMethod::EfficiencyFactor,
            area_per_space: DEFAULT_AREA_PER_SPACE,
            orientation: LayoutOrientation::Rows,
            perimeter: PerimeterConfig::default(),
            fill_mode: FillMode::Optimized,
            levels: LevelConfig::default(),
            display_mode: DisplayMode::Stacked,
            projection: ProjectionMode::LatitudeCorrected,
            basemap: Basemap::EsriWorldImagery,
            geocoder: GeocoderConfig::default(),
            probe_timeout_secs: 5,
            accept_invalid_certs: false,
            log_file: PathBuf::from("parking_estimator.log"),
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
