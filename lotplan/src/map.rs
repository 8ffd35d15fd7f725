use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lotpack::io::ext_repr::ExtRing;

use crate::services::basemap::{Basemap, BasemapInfo};

/// Output of the map's drawing surface, as posted back after every interaction
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DrawingOutput {
    #[serde(default)]
    pub all_drawings: Option<Vec<Drawing>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Drawing {
    pub geometry: DrawingGeometry,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DrawingGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl DrawingOutput {
    /// Outer ring of the most recent drawing, if that drawing is a polygon or rectangle.
    /// Earlier drawings are ignored.
    pub fn last_ring(&self) -> Option<ExtRing> {
        let last = self.all_drawings.as_ref()?.last()?;
        match last.geometry.kind.as_str() {
            "Polygon" | "Rectangle" => {
                let rings: Vec<ExtRing> = serde_json::from_value(last.geometry.coordinates.clone())
                    .inspect_err(|e| debug!("[MAP] unreadable drawing coordinates: {e}"))
                    .ok()?;
                rings.into_iter().next()
            }
            other => {
                debug!("[MAP] ignoring drawing of type {other}");
                None
            }
        }
    }
}

/// Everything the map widget needs to render the current state
#[derive(Clone, Debug, Serialize)]
pub struct MapView {
    pub basemap: Basemap,
    pub tiles: &'static str,
    pub attribution: &'static str,
    /// Imagery description shown next to the selector
    pub info: BasemapInfo,
    /// Basemaps currently offered in the selector
    pub options: Vec<Basemap>,
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    /// GeoJSON feature collection drawn on top of the basemap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlays: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DrawingOutput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_last_drawing() {
        let output = parse(
            r#"{"all_drawings": [
                {"geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}},
                {"geometry": {"type": "Rectangle", "coordinates": [[[2, 2], [3, 2], [3, 3], [2, 3], [2, 2]]]}}
            ]}"#,
        );
        let ring = output.last_ring().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], [2.0, 2.0]);
    }

    #[test]
    fn ignores_other_geometries() {
        let output = parse(
            r#"{"all_drawings": [
                {"geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}},
                {"geometry": {"type": "Point", "coordinates": [5, 5]}}
            ]}"#,
        );
        assert_eq!(output.last_ring(), None);
        assert_eq!(parse(r#"{"all_drawings": null}"#).last_ring(), None);
        assert_eq!(parse("{}").last_ring(), None);
    }
}
