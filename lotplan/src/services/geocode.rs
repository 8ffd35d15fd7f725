use std::time::Duration;

use log::{error, info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::services::error::{ServiceError, ServiceResult, excerpt};

/// Where and how to reach the geocoding service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    /// Nominatim refuses requests without an identifying user agent
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "parking_estimator_app_v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// A geocoded location
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    pub display_name: Option<String>,
}

/// Resolves a free-text address to at most one location.
pub trait Geocoder {
    /// `Ok(None)` if the service answered but found nothing
    fn search(&self, query: &str) -> ServiceResult<Option<Place>>;
}

/// Blocking client for a Nominatim compatible search endpoint
pub struct NominatimGeocoder {
    client: Client,
    config: GeocoderConfig,
}

impl NominatimGeocoder {
    pub fn new(config: GeocoderConfig, accept_invalid_certs: bool) -> ServiceResult<Self> {
        if accept_invalid_certs {
            warn!("[GEOCODE] TLS certificate verification is disabled");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self { client, config })
    }
}

impl Geocoder for NominatimGeocoder {
    fn search(&self, query: &str) -> ServiceResult<Option<Place>> {
        info!("[GEOCODE] request for address: {query}");
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .inspect_err(|e| error!("[GEOCODE] request failed: {e}"))?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            error!("[GEOCODE] status {}, response: {}", status.as_u16(), excerpt(&body));
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let place = parse_search_response(&body)?;
        match &place {
            Some(p) => info!(
                "[GEOCODE] found: {}",
                p.display_name.as_deref().unwrap_or(query)
            ),
            None => warn!("[GEOCODE] no results for: {query}"),
        }
        Ok(place)
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Parses the JSON array returned by a Nominatim search, only the first hit is kept.
/// Coordinates are transmitted as strings.
pub fn parse_search_response(body: &str) -> ServiceResult<Option<Place>> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;

    hits.into_iter()
        .next()
        .map(|hit| -> ServiceResult<Place> {
            let coord = |s: &str| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| ServiceError::Malformed(format!("coordinate {s:?}: {e}")))
            };
            Ok(Place {
                lat: coord(&hit.lat)?,
                lon: coord(&hit.lon)?,
                display_name: hit.display_name,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_hit() {
        let body = r#"[
            {"lat": "41.8789", "lon": "-87.6359", "display_name": "Willis Tower, Chicago"},
            {"lat": "0.0", "lon": "0.0"}
        ]"#;
        let place = parse_search_response(body).unwrap().unwrap();
        assert_eq!(place.lat, 41.8789);
        assert_eq!(place.lon, -87.6359);
        assert_eq!(place.display_name.as_deref(), Some("Willis Tower, Chicago"));
    }

    #[test]
    fn empty_result_is_not_an_error() {
        assert_eq!(parse_search_response("[]").unwrap(), None);
    }

    #[test]
    fn malformed_responses() {
        assert!(matches!(
            parse_search_response("<html>"),
            Err(ServiceError::Malformed(_))
        ));
        assert!(matches!(
            parse_search_response(r#"[{"lat": "north", "lon": "1.0"}]"#),
            Err(ServiceError::Malformed(_))
        ));
    }
}
