use serde_json::{Value, json};

use crate::io::ext_repr::{ExtLayout, ExtLevel, ExtRing};

fn polygon_feature(ring: &ExtRing, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": properties,
    })
}

/// Builds a GeoJSON `FeatureCollection` with the lot outline, the corner islands and one
/// feature per stall per level, carrying the styling of its level.
pub fn feature_collection(boundary: &ExtRing, layout: &ExtLayout, levels: &[ExtLevel]) -> Value {
    let mut features = vec![polygon_feature(boundary, json!({ "kind": "boundary" }))];

    features.extend(
        layout
            .islands
            .iter()
            .map(|island| polygon_feature(island, json!({ "kind": "island" }))),
    );

    for level in levels {
        features.extend(level.stalls.iter().map(|ring| {
            polygon_feature(
                ring,
                json!({
                    "kind": "stall",
                    "level": level.index,
                    "elevation": level.elevation,
                    "color": level.color,
                    "opacity": level.opacity,
                }),
            )
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_feature_per_stall_per_level() {
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let level = |index: usize| ExtLevel {
            index,
            elevation: 3.0 * index as f64,
            color: "#000000".into(),
            opacity: 0.8,
            stalls: vec![ring.clone(), ring.clone()],
        };
        let fc = feature_collection(&ring, &ExtLayout::default(), &[level(0), level(1)]);
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 1 + 4);
        assert_eq!(features[0]["properties"]["kind"], "boundary");
        assert_eq!(features[4]["properties"]["level"], 1);
        assert_eq!(features[4]["properties"]["elevation"], 3.0);
        assert_eq!(features[1]["geometry"]["coordinates"][0][2][1], 1.0);
    }
}
