use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::{error, info, warn};
use serde::Serialize;

use lotpack::entities::{DimensionSet, Layout, Lot, StallDims};
use lotpack::estimate::{self, CalcMethod, CalculationResult, CapacityDelta};
use lotpack::extrude::{self, Extrusion, LevelConfig};
use lotpack::geometry::ProjectionMode;
use lotpack::geometry::geo_enums::Axis;
use lotpack::geometry::primitives::Point;
use lotpack::io::export::{self, export_ring};
use lotpack::io::ext_repr::ExtRing;
use lotpack::io::geojson;
use lotpack::io::import::import_ring;
use lotpack::packing::{self, DEFAULT_ANGLE_DEG, LayoutStrategy, PackConfig, PerimeterConfig};
use lotpack::units::{self, ParkingType};

use crate::config::{FillMode, LayoutOrientation, LotConfig};
use crate::map::{DrawingOutput, MapView};
use crate::services::basemap::{Basemap, BasemapHealth, TileProbe};
use crate::services::error::ServiceError;
use crate::services::geocode::Geocoder;

/// `(lat, lon)` of the initial map center (Chicago)
pub const DEFAULT_CENTER: (f64, f64) = (41.8781, -87.6298);
pub const DEFAULT_ZOOM: u8 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing outcome of a handler
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        StatusMessage {
            level,
            text: text.into(),
        }
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.text)
    }
}

/// Parameters of a requested layout, frozen at the moment of the request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutParams {
    /// `[lon, lat]` ring of the lot
    pub polygon: ExtRing,
    pub dims: StallDims,
    pub parking_type: ParkingType,
    pub orientation: LayoutOrientation,
    pub perimeter: PerimeterConfig,
    pub fill_mode: FillMode,
    pub levels: LevelConfig,
    pub projection: ProjectionMode,
}

impl LayoutParams {
    /// Parallel stalls always line the edges, angled stalls follow the orientation's axis.
    pub fn strategy(&self) -> LayoutStrategy {
        let axis = match self.orientation {
            LayoutOrientation::Columns => Axis::Vertical,
            _ => Axis::Horizontal,
        };
        match (self.parking_type, self.orientation) {
            (ParkingType::Parallel, _) => LayoutStrategy::Parallel,
            (ParkingType::Angled, _) => LayoutStrategy::Angled {
                axis,
                angle_deg: DEFAULT_ANGLE_DEG,
            },
            (_, LayoutOrientation::Rows) => LayoutStrategy::RowBased,
            (_, LayoutOrientation::Columns) => LayoutStrategy::ColumnBased,
            (_, LayoutOrientation::PerimeterCenter) => LayoutStrategy::PerimeterCenter(self.perimeter),
        }
    }
}

/// `[lon, lat]` ring closed exactly once, whether or not the drawing repeated its first vertex
fn closed_ring(points: &[Point]) -> ExtRing {
    let closing = match points.first() == points.last() {
        true => None,
        false => points.first().copied(),
    };
    export_ring(points.iter().copied().chain(closing))
}

/// A packed and extruded layout together with the parameters it was made with
#[derive(Clone, Debug)]
pub struct LayoutOutcome {
    pub params: LayoutParams,
    pub lot: Lot,
    /// Single level, in the local meters of the lot
    pub layout: Layout,
    /// All levels, in `(lon, lat)`
    pub extrusion: Extrusion,
    pub delta: CapacityDelta,
}

/// State of one planning session. Owned by the caller and handed to every handler,
/// which runs to completion before the next one starts.
#[derive(Debug)]
pub struct SessionState {
    pub config: LotConfig,
    /// `(lon, lat)` ring of the last drawn lot
    pub polygon: Option<Vec<Point>>,
    /// `(lat, lon)`
    pub map_center: (f64, f64),
    pub zoom: u8,
    pub calculation: Option<CalculationResult>,
    pub layout: Option<LayoutOutcome>,
    pub basemaps: BasemapHealth,
}

impl SessionState {
    pub fn new(config: LotConfig) -> Self {
        SessionState {
            config,
            polygon: None,
            map_center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            calculation: None,
            layout: None,
            basemaps: BasemapHealth::default(),
        }
    }

    /// Stall dimensions (in meters) and planning ratios from the current configuration
    pub fn dimension_set(&self) -> DimensionSet {
        let c = &self.config;
        let preset = units::resolve(c.unit_system, c.parking_type);
        let dims = preset.dims_in_meters(c.stall_width, c.stall_length, c.aisle_width);
        match c.calc_method {
            CalcMethod::EfficiencyFactor => {
                DimensionSet::from_efficiency(dims, c.efficiency.unwrap_or(preset.efficiency))
            }
            CalcMethod::IteAreaPerSpace => DimensionSet::from_area_per_space(dims, c.area_per_space),
        }
    }

    fn current_lot(&self) -> Option<Lot> {
        self.polygon
            .as_ref()
            .map(|ring| Lot::new(ring.clone(), self.config.projection))
    }

    /// Adopts the outer ring of the most recent drawing and estimates its capacity.
    /// Drawings that are not polygons or rectangles leave the session untouched.
    pub fn handle_drawing(&mut self, drawing: &DrawingOutput) -> StatusMessage {
        let Some(ring) = drawing.last_ring() else {
            return StatusMessage::new(
                StatusLevel::Info,
                "Draw a polygon or rectangle on the map to calculate parking capacity",
            );
        };
        match import_ring(&ring) {
            Ok(points) => {
                info!("[SESSION] new lot with {} vertices", points.len());
                self.polygon = Some(points);
                match self.recalculate() {
                    Some(result) => StatusMessage::new(
                        StatusLevel::Success,
                        format!(
                            "{} estimated spaces on {:.1} m²",
                            result.estimated_spaces, result.area_m2
                        ),
                    ),
                    None => StatusMessage::new(StatusLevel::Warning, "No lot to estimate"),
                }
            }
            Err(e) => {
                error!("[SESSION] rejected drawing: {e}");
                StatusMessage::new(StatusLevel::Error, format!("Invalid drawing: {e}"))
            }
        }
    }

    /// Reruns the estimate for the current lot, e.g. after a parameter change.
    /// An existing layout is left as it was requested.
    pub fn recalculate(&mut self) -> Option<&CalculationResult> {
        let lot = self.current_lot()?;
        let levels = self.config.levels;
        let result = estimate::estimate(
            lot.area_m2(),
            self.dimension_set(),
            self.config.calc_method,
            levels.structure,
            levels.levels,
        );
        info!(
            "[SESSION] estimate: {} spaces ({} per level) on {:.1} m²",
            result.estimated_spaces, result.estimated_spaces_per_level, result.area_m2
        );
        self.calculation = Some(result);
        self.calculation.as_ref()
    }

    /// Freezes the current parameters, packs the lot and extrudes the packed level.
    pub fn request_layout(&mut self) -> StatusMessage {
        let Some(polygon) = self.polygon.clone() else {
            return StatusMessage::new(StatusLevel::Warning, "Draw a lot before requesting a layout");
        };
        let Some(calculation) = self.recalculate().copied() else {
            return StatusMessage::new(StatusLevel::Warning, "No lot to lay out");
        };
        let c = &self.config;
        let params = LayoutParams {
            polygon: closed_ring(&polygon),
            dims: calculation.dimensions.dims,
            parking_type: c.parking_type,
            orientation: c.orientation,
            perimeter: c.perimeter,
            fill_mode: c.fill_mode,
            levels: c.levels,
            projection: c.projection,
        };
        let max_count = match params.fill_mode {
            FillMode::Conservative => Some(calculation.estimated_spaces_per_level as usize),
            FillMode::Optimized => None,
        };
        let pack_config = PackConfig {
            dims: params.dims,
            strategy: params.strategy(),
            max_count,
        };

        let lot = Lot::new(polygon, params.projection);
        let layout = packing::pack_lot(&lot, &pack_config);
        let geo_stalls = export::geo_stalls(&layout, &lot);
        let extrusion = extrude::extrude(&geo_stalls, &params.levels, c.display_mode);
        let delta = CapacityDelta::new(layout.n_stalls() as u64, calculation.estimated_spaces_per_level);

        let status = match layout.warnings.is_empty() {
            true => StatusMessage::new(
                StatusLevel::Success,
                format!(
                    "Placed {} stalls per level, {} in total ({:+} vs. estimate)",
                    layout.n_stalls(),
                    extrusion.total_spaces,
                    delta.delta
                ),
            ),
            false => StatusMessage::new(
                StatusLevel::Warning,
                layout.warnings.iter().map(|w| w.to_string()).join("; "),
            ),
        };
        info!("[SESSION] layout requested: {status}");

        self.layout = Some(LayoutOutcome {
            params,
            lot,
            layout,
            extrusion,
            delta,
        });
        status
    }

    /// Drops the current layout, only on explicit request
    pub fn clear_layout(&mut self) {
        if self.layout.take().is_some() {
            info!("[SESSION] layout cleared");
        }
    }

    /// Geocodes `query` and recenters the map on the result
    pub fn search_address(&mut self, geocoder: &dyn Geocoder, query: &str) -> StatusMessage {
        if query.trim().is_empty() {
            return StatusMessage::new(StatusLevel::Info, "Enter an address or place name");
        }
        match geocoder.search(query) {
            Ok(Some(place)) => {
                self.map_center = (place.lat, place.lon);
                self.zoom = DEFAULT_ZOOM;
                let name = place.display_name.unwrap_or_else(|| query.to_string());
                StatusMessage::new(StatusLevel::Success, format!("Found: {name}"))
            }
            Ok(None) => StatusMessage::new(
                StatusLevel::Error,
                "Address not found. Please try a different search term.",
            ),
            Err(e) => {
                warn!("[SESSION] address search failed: {e}");
                let text = match e {
                    ServiceError::Timeout(_) => "Search timed out. Please try again.".to_string(),
                    ServiceError::Connection(_) => {
                        "Connection error. Please check your network.".to_string()
                    }
                    ServiceError::Status { status, .. } => {
                        format!("Search failed with status code: {status}")
                    }
                    other => format!("Search error: {other}"),
                };
                StatusMessage::new(StatusLevel::Error, text)
            }
        }
    }

    /// Probes every basemap and reports the ones that are down
    pub fn refresh_basemaps(&mut self, probe: &dyn TileProbe) -> StatusMessage {
        self.basemaps.refresh(probe);
        let down = Basemap::ALL
            .into_iter()
            .filter(|b| !self.basemaps.is_available(*b))
            .map(|b| b.label())
            .join(", ");
        match down.is_empty() {
            true => StatusMessage::new(StatusLevel::Success, "All basemaps available"),
            false => StatusMessage::new(StatusLevel::Warning, format!("Currently unavailable: {down}")),
        }
    }

    /// Probes the NAIP endpoint again, e.g. after it was reported unavailable
    pub fn retest_naip(&mut self, probe: &dyn TileProbe) -> StatusMessage {
        match self.basemaps.check(probe, Basemap::UsdaNaip) {
            true => StatusMessage::new(StatusLevel::Success, "NAIP is now available"),
            false => StatusMessage::new(StatusLevel::Error, "NAIP still unavailable"),
        }
    }

    /// Render request for the map: effective basemap, view and overlays of the current layout
    pub fn map_view(&self) -> MapView {
        let basemap = self.basemaps.effective(self.config.basemap);
        let overlays = self.layout.as_ref().map(|outcome| {
            geojson::feature_collection(
                &outcome.params.polygon,
                &export::export_layout(&outcome.layout, &outcome.lot),
                &export::export_levels(&outcome.extrusion),
            )
        });
        MapView {
            basemap,
            tiles: basemap.tiles(),
            attribution: basemap.attribution(),
            info: basemap.info(),
            options: self.basemaps.options(),
            center: [self.map_center.0, self.map_center.1],
            zoom: self.zoom,
            overlays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_closed_once() {
        let open = vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(1.0, 1.0), Point(0.0, 1.0)];
        let mut closed = open.clone();
        closed.push(Point(0.0, 0.0));
        for points in [open, closed] {
            let ring = closed_ring(&points);
            assert_eq!(ring.len(), 5);
            assert_eq!(ring[0], ring[4]);
        }
        assert!(closed_ring(&[]).is_empty());
    }
}
