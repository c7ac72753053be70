use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub osrm_url: String,
    pub engine: EngineConfig,
}

/// Tuning parameters for the route construction engine. Every threshold the
/// engine uses is injected from here so behavior is reproducible per call.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Detour ratio used by the corridor filter during POI discovery,
    /// independent of the per-variant detour budgets
    pub corridor_detour_ratio: f64,

    /// Minimum distance (km) a waypoint must keep from the start and end
    pub min_endpoint_proximity_km: f64,

    /// Minimum spacing (km) between selected waypoints
    pub min_separation_km: f64,

    /// Detour budget multiplier for the balanced variant
    pub balanced_detour_factor: f64,

    /// Detour budget multiplier for the most-scenic variant
    pub scenic_detour_factor: f64,

    /// Wall-clock budget (ms) for the tour solver
    pub solver_time_budget_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corridor_detour_ratio: DEFAULT_CORRIDOR_DETOUR_RATIO,
            min_endpoint_proximity_km: DEFAULT_MIN_ENDPOINT_PROXIMITY_KM,
            min_separation_km: DEFAULT_MIN_SEPARATION_KM,
            balanced_detour_factor: DEFAULT_BALANCED_DETOUR_FACTOR,
            scenic_detour_factor: DEFAULT_SCENIC_DETOUR_FACTOR,
            solver_time_budget_ms: DEFAULT_SOLVER_TIME_BUDGET_MS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            corridor_detour_ratio: env::var("ENGINE_CORRIDOR_DETOUR_RATIO")
                .unwrap_or_else(|_| defaults.corridor_detour_ratio.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_CORRIDOR_DETOUR_RATIO")?,

            min_endpoint_proximity_km: env::var("ENGINE_MIN_ENDPOINT_PROXIMITY_KM")
                .unwrap_or_else(|_| defaults.min_endpoint_proximity_km.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_MIN_ENDPOINT_PROXIMITY_KM")?,

            min_separation_km: env::var("ENGINE_MIN_SEPARATION_KM")
                .unwrap_or_else(|_| defaults.min_separation_km.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_MIN_SEPARATION_KM")?,

            balanced_detour_factor: env::var("ENGINE_BALANCED_DETOUR_FACTOR")
                .unwrap_or_else(|_| defaults.balanced_detour_factor.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_BALANCED_DETOUR_FACTOR")?,

            scenic_detour_factor: env::var("ENGINE_SCENIC_DETOUR_FACTOR")
                .unwrap_or_else(|_| defaults.scenic_detour_factor.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_SCENIC_DETOUR_FACTOR")?,

            solver_time_budget_ms: env::var("ENGINE_SOLVER_TIME_BUDGET_MS")
                .unwrap_or_else(|_| defaults.solver_time_budget_ms.to_string())
                .parse()
                .map_err(|_| "Invalid ENGINE_SOLVER_TIME_BUDGET_MS")?,
        };

        if config.balanced_detour_factor < 1.0 || config.scenic_detour_factor < 1.0 {
            return Err("Detour factors must be at least 1.0".to_string());
        }
        if config.solver_time_budget_ms == 0 {
            return Err("ENGINE_SOLVER_TIME_BUDGET_MS must be positive".to_string());
        }

        Ok(config)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string()),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string()),
            osrm_url: env::var("OSRM_URL").unwrap_or_else(|_| DEFAULT_OSRM_URL.to_string()),
            engine: EngineConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
