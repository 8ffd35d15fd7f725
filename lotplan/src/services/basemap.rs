use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use log::{error, info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::services::error::{ServiceError, ServiceResult, excerpt};

/// Background imagery of the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basemap {
    #[default]
    EsriWorldImagery,
    GoogleSatellite,
    EsriClarity,
    UsdaNaip,
    /// Street map, always available
    OpenStreetMap,
}

/// Description of the imagery shown next to the basemap selector
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BasemapInfo {
    pub update_frequency: &'static str,
    pub resolution: &'static str,
    pub coverage: &'static str,
    pub notes: &'static str,
}

impl Basemap {
    pub const ALL: [Basemap; 5] = [
        Basemap::EsriWorldImagery,
        Basemap::GoogleSatellite,
        Basemap::EsriClarity,
        Basemap::UsdaNaip,
        Basemap::OpenStreetMap,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Basemap::EsriWorldImagery => "Esri World Imagery",
            Basemap::GoogleSatellite => "Google Satellite",
            Basemap::EsriClarity => "Esri Clarity (High-Res)",
            Basemap::UsdaNaip => "USDA NAIP (via Esri)",
            Basemap::OpenStreetMap => "OpenStreetMap",
        }
    }

    /// XYZ tile url template
    pub fn tiles(&self) -> &'static str {
        match self {
            Basemap::EsriWorldImagery => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            Basemap::GoogleSatellite => "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            Basemap::EsriClarity => {
                "https://clarity.maptiles.arcgis.com/arcgis/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            Basemap::UsdaNaip => {
                "https://naip.arcgis.com/arcgis/rest/services/NAIP/ImageServer/tile/{z}/{y}/{x}"
            }
            Basemap::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::EsriWorldImagery => "Esri",
            Basemap::GoogleSatellite => "Google",
            Basemap::EsriClarity => "Esri Clarity",
            Basemap::UsdaNaip => "USDA NAIP",
            Basemap::OpenStreetMap => "OpenStreetMap",
        }
    }

    /// Metadata or sample tile endpoint used to check availability, `None` if never checked
    pub fn probe_url(&self) -> Option<&'static str> {
        match self {
            Basemap::EsriWorldImagery => Some(
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer?f=json",
            ),
            Basemap::GoogleSatellite => Some("https://mt1.google.com/vt/lyrs=s&x=0&y=0&z=0"),
            Basemap::EsriClarity => Some(
                "https://clarity.maptiles.arcgis.com/arcgis/rest/services/World_Imagery/MapServer?f=json",
            ),
            Basemap::UsdaNaip => {
                Some("https://naip.arcgis.com/arcgis/rest/services/NAIP/ImageServer?f=json")
            }
            Basemap::OpenStreetMap => None,
        }
    }

    pub fn info(&self) -> BasemapInfo {
        match self {
            Basemap::EsriWorldImagery => BasemapInfo {
                update_frequency: "Quarterly to annually",
                resolution: "30cm-1m in urban areas, varies globally",
                coverage: "Global",
                notes: "Composite from multiple sources including DigitalGlobe, GeoEye, and others. Urban areas typically more recent.",
            },
            Basemap::GoogleSatellite => BasemapInfo {
                update_frequency: "Monthly to annually",
                resolution: "15cm-1m depending on location",
                coverage: "Global",
                notes: "More frequent updates in populated areas. Check Google Earth for specific imagery dates.",
            },
            Basemap::EsriClarity => BasemapInfo {
                update_frequency: "Annually",
                resolution: "30-50cm",
                coverage: "Global population centers",
                notes: "Vivid natural color imagery with excellent clarity for urban planning.",
            },
            Basemap::UsdaNaip => BasemapInfo {
                update_frequency: "Every 2-3 years per state",
                resolution: "60cm-1m",
                coverage: "Continental US only",
                notes: "High-quality USDA aerial imagery served through Esri's reliable infrastructure.",
            },
            Basemap::OpenStreetMap => BasemapInfo {
                update_frequency: "Real-time (map data)",
                resolution: "Vector data",
                coverage: "Global",
                notes: "Community-maintained street map. Not satellite imagery but useful for reference.",
            },
        }
    }
}

impl Display for Basemap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks whether an endpoint answers.
pub trait TileProbe {
    fn probe(&self, url: &str) -> ServiceResult<()>;
}

/// Probes endpoints with blocking GET requests, anything but `200 OK` counts as unavailable
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout_secs: u64, accept_invalid_certs: bool) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self { client })
    }
}

impl TileProbe for HttpProbe {
    fn probe(&self, url: &str) -> ServiceResult<()> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        match status == reqwest::StatusCode::OK {
            true => Ok(()),
            false => Err(ServiceError::Status {
                status: status.as_u16(),
                body: excerpt(&response.text().unwrap_or_default()),
            }),
        }
    }
}

/// Availability of the basemaps as last observed.
/// Basemaps that were never probed are assumed to be available.
#[derive(Clone, Debug, Default)]
pub struct BasemapHealth {
    available: HashMap<Basemap, bool>,
}

impl BasemapHealth {
    /// Probes a single basemap and records the outcome
    pub fn check(&mut self, probe: &dyn TileProbe, basemap: Basemap) -> bool {
        let available = match basemap.probe_url() {
            None => true,
            Some(url) => {
                info!("[BASEMAP] testing {basemap} endpoint: {url}");
                match probe.probe(url) {
                    Ok(()) => {
                        info!("[BASEMAP] {basemap} endpoint available");
                        true
                    }
                    Err(e) => {
                        error!("[BASEMAP] {basemap} endpoint unavailable: {e}");
                        false
                    }
                }
            }
        };
        self.available.insert(basemap, available);
        available
    }

    /// Probes every basemap that has a probe endpoint
    pub fn refresh(&mut self, probe: &dyn TileProbe) {
        for basemap in Basemap::ALL {
            self.check(probe, basemap);
        }
    }

    pub fn is_available(&self, basemap: Basemap) -> bool {
        basemap == Basemap::OpenStreetMap || self.available.get(&basemap).copied().unwrap_or(true)
    }

    /// Basemaps that can be offered, OpenStreetMap always included
    pub fn options(&self) -> Vec<Basemap> {
        Basemap::ALL
            .into_iter()
            .filter(|b| self.is_available(*b))
            .collect()
    }

    /// The requested basemap, or OpenStreetMap if it is unavailable
    pub fn effective(&self, requested: Basemap) -> Basemap {
        match self.is_available(requested) {
            true => requested,
            false => {
                warn!("[BASEMAP] {requested} unavailable, falling back to {}", Basemap::OpenStreetMap);
                Basemap::OpenStreetMap
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NaipDown;

    impl TileProbe for NaipDown {
        fn probe(&self, url: &str) -> ServiceResult<()> {
            match url.contains("naip") {
                true => Err(ServiceError::Status {
                    status: 503,
                    body: "shutdown".into(),
                }),
                false => Ok(()),
            }
        }
    }

    #[test]
    fn unavailable_basemap_falls_back() {
        let mut health = BasemapHealth::default();
        assert!(health.is_available(Basemap::UsdaNaip));

        health.refresh(&NaipDown);
        assert!(!health.is_available(Basemap::UsdaNaip));
        assert_eq!(health.effective(Basemap::UsdaNaip), Basemap::OpenStreetMap);
        assert_eq!(health.effective(Basemap::GoogleSatellite), Basemap::GoogleSatellite);
        assert_eq!(health.options().len(), 4);
        assert_eq!(health.options().last(), Some(&Basemap::OpenStreetMap));
    }
}
