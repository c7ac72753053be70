use crate::constants::OSRM_LEG_TIMEOUT_SECONDS;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Road path and distance for one leg between adjacent tour stops
#[derive(Debug, Clone)]
pub struct LegRoute {
    /// Road geometry from `from` to `to`
    pub path: Vec<Coordinates>,
    pub distance_km: f64,
}

/// Road-routing collaborator. A failed leg is reported as an error and
/// degraded by the caller; implementations never need to synthesize
/// fallbacks themselves.
#[async_trait]
pub trait RoadRouter: Send + Sync {
    async fn route_leg(&self, from: &Coordinates, to: &Coordinates) -> Result<LegRoute>;
}

#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(base_url: String) -> Self {
        OsrmClient {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl RoadRouter for OsrmClient {
    async fn route_leg(&self, from: &Coordinates, to: &Coordinates) -> Result<LegRoute> {
        // OSRM takes lon,lat pairs
        let url = format!(
            "{}/{},{};{},{}",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        );

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .timeout(std::time::Duration::from_secs(OSRM_LEG_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::RoutingApi(format!("HTTP {}", response.status())));
        }

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Failed to parse response: {}", e)))?;

        let Some(route) = body.routes.first() else {
            return Err(AppError::RoutingApi("No routes found".to_string()));
        };

        let path = route
            .geometry
            .coordinates
            .iter()
            .filter_map(|pair| Coordinates::new(pair[1], pair[0]).ok())
            .collect();

        Ok(LegRoute {
            path,
            distance_km: route.distance / 1000.0,
        })
    }
}

// OSRM API response types

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters
    distance: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON [lon, lat] pairs
    coordinates: Vec<[f64; 2]>,
}
