#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use float_cmp::approx_eq;
    use serde_json::json;
    use test_case::test_case;

    use lotpack::estimate::CalcMethod;
    use lotpack::extrude::{LevelConfig, StructureType};
    use lotpack::geometry::ProjectionMode;
    use lotpack::geometry::geo_enums::Axis;
    use lotpack::packing::{LayoutStrategy, PerimeterConfig};
    use lotpack::units::ParkingType;
    use lotplan::config::{FillMode, LayoutOrientation, LotConfig};
    use lotplan::map::DrawingOutput;
    use lotplan::services::ServiceError;
    use lotplan::services::basemap::{Basemap, TileProbe};
    use lotplan::services::geocode::{Geocoder, Place};
    use lotplan::session::{DEFAULT_CENTER, SessionState, StatusLevel};

    const LON: f64 = -87.6298;
    const LAT: f64 = 41.8781;

    /// Drawing of a `width` x `height` meter rectangle, in degrees with the fixed scale factors
    fn drawing(width: f64, height: f64) -> DrawingOutput {
        let corner = |x: f64, y: f64| json!([LON + x / 82_000.0, LAT + y / 111_000.0]);
        serde_json::from_value(json!({
            "all_drawings": [{
                "geometry": {
                    "type": "Rectangle",
                    "coordinates": [[
                        corner(0.0, 0.0),
                        corner(width, 0.0),
                        corner(width, height),
                        corner(0.0, height),
                        corner(0.0, 0.0)
                    ]]
                }
            }]
        }))
        .unwrap()
    }

    fn session(config: LotConfig) -> SessionState {
        let _ = env_logger::builder().is_test(true).try_init();
        SessionState::new(LotConfig {
            projection: ProjectionMode::Fixed,
            ..config
        })
    }

    struct FakeGeocoder(fn() -> Result<Option<Place>, ServiceError>);

    impl Geocoder for FakeGeocoder {
        fn search(&self, _query: &str) -> Result<Option<Place>, ServiceError> {
            (self.0)()
        }
    }

    struct FlakyProbe {
        up: Cell<bool>,
    }

    impl TileProbe for FlakyProbe {
        fn probe(&self, url: &str) -> Result<(), ServiceError> {
            match self.up.get() || !url.contains("naip") {
                true => Ok(()),
                false => Err(ServiceError::Timeout(url.to_string())),
            }
        }
    }

    #[test]
    fn drawing_triggers_estimate() {
        let mut session = session(LotConfig::default());
        let status = session.handle_drawing(&drawing(50.0, 31.0));
        assert_eq!(status.level, StatusLevel::Success);

        let result = session.calculation.unwrap();
        assert!(approx_eq!(f64, result.area_m2, 1550.0, epsilon = 1e-4));
        //1550 * 0.85 / 12.5 = 105.4
        assert_eq!(result.estimated_spaces_per_level, 105);
        assert_eq!(result.estimated_spaces, 105);
    }

    #[test]
    fn non_polygon_drawing_is_ignored() {
        let mut session = session(LotConfig::default());
        let point: DrawingOutput = serde_json::from_value(json!({
            "all_drawings": [{"geometry": {"type": "Point", "coordinates": [LON, LAT]}}]
        }))
        .unwrap();
        let status = session.handle_drawing(&point);
        assert_eq!(status.level, StatusLevel::Info);
        assert!(session.polygon.is_none());
        assert!(session.calculation.is_none());
    }

    #[test]
    fn optimized_layout_packs_everything() {
        let mut session = session(LotConfig::default());
        session.handle_drawing(&drawing(50.0, 31.0));
        let status = session.request_layout();
        assert_eq!(status.level, StatusLevel::Success);

        let outcome = session.layout.as_ref().unwrap();
        assert_eq!(outcome.params.strategy(), LayoutStrategy::RowBased);
        assert_eq!(outcome.layout.n_stalls(), 60);
        assert_eq!(outcome.extrusion.total_spaces, 60);
        assert_eq!(outcome.delta.delta, 60 - 105);

        let view = session.map_view();
        let features = view.overlays.unwrap()["features"].as_array().unwrap().len();
        assert_eq!(features, 1 + 60);
    }

    #[test]
    fn closed_drawing_keeps_a_single_closing_vertex() {
        let mut session = session(LotConfig::default());
        session.handle_drawing(&drawing(50.0, 30.0));
        session.request_layout();

        let ring = &session.layout.as_ref().unwrap().params.polygon;
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_ne!(ring[3], ring[4]);

        let overlays = session.map_view().overlays.unwrap();
        let boundary = overlays["features"][0]["geometry"]["coordinates"][0]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(boundary, 5);
    }

    #[test]
    fn conservative_layout_stops_at_estimate() {
        let mut session = session(LotConfig {
            calc_method: CalcMethod::IteAreaPerSpace,
            area_per_space: 30.0,
            fill_mode: FillMode::Conservative,
            ..LotConfig::default()
        });
        session.handle_drawing(&drawing(50.0, 31.0));
        session.request_layout();

        let outcome = session.layout.as_ref().unwrap();
        //1550 / 30 = 51.7
        assert_eq!(outcome.layout.n_stalls(), 51);
        assert_eq!(outcome.delta.delta, 0);
    }

    #[test]
    fn layout_is_frozen_until_requested_again() {
        let mut session = session(LotConfig::default());
        session.handle_drawing(&drawing(50.0, 31.0));
        session.request_layout();

        session.config.orientation = LayoutOrientation::Columns;
        session.recalculate();
        let outcome = session.layout.as_ref().unwrap();
        assert_eq!(outcome.params.orientation, LayoutOrientation::Rows);
        assert_eq!(outcome.layout.n_stalls(), 60);

        session.request_layout();
        assert_eq!(session.layout.as_ref().unwrap().layout.n_stalls(), 72);

        session.clear_layout();
        assert!(session.layout.is_none());
        assert!(session.calculation.is_some());
        assert!(session.map_view().overlays.is_none());
    }

    #[test]
    fn structure_replicates_levels() {
        let mut session = session(LotConfig {
            levels: LevelConfig {
                structure: StructureType::Underground,
                levels: 3,
                floor_height: 3.5,
            },
            ..LotConfig::default()
        });
        session.handle_drawing(&drawing(50.0, 31.0));
        assert_eq!(session.calculation.unwrap().estimated_spaces, 3 * 105);

        session.request_layout();
        let ext = &session.layout.as_ref().unwrap().extrusion;
        assert_eq!(ext.total_spaces, 180);
        let elevations = ext.levels.iter().map(|l| l.elevation).collect::<Vec<_>>();
        assert_eq!(elevations, vec![-3.5, -7.0, -10.5]);
    }

    #[test]
    fn shallow_center_reports_warning() {
        let mut session = session(LotConfig {
            orientation: LayoutOrientation::PerimeterCenter,
            perimeter: PerimeterConfig {
                corner_island_size: 11.0,
                center_rows: 3,
                show_islands: true,
            },
            ..LotConfig::default()
        });
        session.handle_drawing(&drawing(60.0, 50.0));
        let status = session.request_layout();
        assert_eq!(status.level, StatusLevel::Warning);
        assert!(!session.layout.as_ref().unwrap().layout.is_empty());
    }

    #[test_case(ParkingType::Perpendicular, LayoutOrientation::Rows, LayoutStrategy::RowBased; "rows")]
    #[test_case(ParkingType::Compact, LayoutOrientation::Columns, LayoutStrategy::ColumnBased; "compact columns")]
    #[test_case(ParkingType::Parallel, LayoutOrientation::Columns, LayoutStrategy::Parallel; "parallel ignores orientation")]
    #[test_case(ParkingType::Angled, LayoutOrientation::Columns, LayoutStrategy::Angled { axis: Axis::Vertical, angle_deg: 45.0 }; "angled columns")]
    #[test_case(ParkingType::Perpendicular, LayoutOrientation::PerimeterCenter, LayoutStrategy::PerimeterCenter(PerimeterConfig::default()); "perimeter")]
    fn strategy_follows_parameters(
        parking_type: ParkingType,
        orientation: LayoutOrientation,
        expected: LayoutStrategy,
    ) {
        let mut session = session(LotConfig {
            parking_type,
            orientation,
            ..LotConfig::default()
        });
        session.handle_drawing(&drawing(50.0, 31.0));
        session.request_layout();
        assert_eq!(session.layout.unwrap().params.strategy(), expected);
    }

    #[test]
    fn address_search_recenters_map() {
        let mut session = session(LotConfig::default());
        session.zoom = 12;
        let found = FakeGeocoder(|| {
            Ok(Some(Place {
                lat: 40.0,
                lon: -88.0,
                display_name: Some("Somewhere, IL".into()),
            }))
        });
        let status = session.search_address(&found, "somewhere");
        assert_eq!(status.level, StatusLevel::Success);
        assert_eq!(status.text, "Found: Somewhere, IL");
        assert_eq!(session.map_center, (40.0, -88.0));
        assert_eq!(session.zoom, 18);
    }

    #[test]
    fn failed_search_keeps_map() {
        let mut session = session(LotConfig::default());
        let nothing = FakeGeocoder(|| Ok(None));
        let timeout = FakeGeocoder(|| Err(ServiceError::Timeout("10s".into())));
        let refused = FakeGeocoder(|| {
            Err(ServiceError::Status {
                status: 403,
                body: "blocked".into(),
            })
        });

        assert_eq!(session.search_address(&nothing, "nowhere").level, StatusLevel::Error);
        assert_eq!(
            session.search_address(&timeout, "slow").text,
            "Search timed out. Please try again."
        );
        assert_eq!(
            session.search_address(&refused, "blocked").text,
            "Search failed with status code: 403"
        );
        assert_eq!(session.search_address(&nothing, "  ").level, StatusLevel::Info);
        assert_eq!(session.map_center, DEFAULT_CENTER);
    }

    #[test]
    fn naip_outage_falls_back_to_osm() {
        let mut session = session(LotConfig {
            basemap: Basemap::UsdaNaip,
            ..LotConfig::default()
        });
        let probe = FlakyProbe {
            up: Cell::new(false),
        };
        assert_eq!(session.refresh_basemaps(&probe).level, StatusLevel::Warning);
        assert_eq!(session.map_view().basemap, Basemap::OpenStreetMap);
        assert_eq!(session.retest_naip(&probe).level, StatusLevel::Error);

        let view = session.map_view();
        assert!(!view.options.contains(&Basemap::UsdaNaip));
        assert_eq!(view.options.len(), 4);
        assert_eq!(view.info.coverage, "Global");

        probe.up.set(true);
        assert_eq!(session.retest_naip(&probe).level, StatusLevel::Success);
        let view = session.map_view();
        assert_eq!(view.basemap, Basemap::UsdaNaip);
        assert_eq!(view.attribution, "USDA NAIP");
        assert_eq!(view.options, Basemap::ALL.to_vec());
        assert_eq!(view.info.coverage, "Continental US only");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: LotConfig =
            serde_json::from_str(r#"{"parking_type": "compact", "levels": {"structure": "aboveground", "levels": 2, "floor_height": 3.0}}"#)
                .unwrap();
        assert_eq!(config.parking_type, ParkingType::Compact);
        assert_eq!(config.levels.levels, 2);
        assert_eq!(config.fill_mode, FillMode::Optimized);
        assert_eq!(config.geocoder.timeout_secs, 10);

        let session = SessionState::new(config);
        let dims = session.dimension_set();
        assert_eq!(dims.dims.width, 2.3);
        assert_eq!(dims.efficiency, 0.87);
    }
}
