//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change. For
//! tuning knobs that benefit from runtime experimentation, see
//! [`EngineConfig`](crate::config::EngineConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Collaborator endpoints (overridable by env vars) ---

/// Default Nominatim geocoding endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
/// Default Overpass API endpoint for POI discovery.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Default OSRM routing endpoint (driving profile).
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org/route/v1/driving";
/// User-Agent sent to Nominatim, which requires one for identification.
pub const GEOCODER_USER_AGENT: &str = "scenicroute/0.1";

// --- Engine defaults (fallbacks for EngineConfig env vars) ---

/// Detour ratio applied at the corridor-filtering stage, independent of the
/// per-variant budget.
pub const DEFAULT_CORRIDOR_DETOUR_RATIO: f64 = 2.0;
/// Minimum distance (km) a waypoint must keep from either endpoint.
pub const DEFAULT_MIN_ENDPOINT_PROXIMITY_KM: f64 = 30.0;
/// Minimum spacing (km) between any two selected waypoints.
pub const DEFAULT_MIN_SEPARATION_KM: f64 = 5.0;
/// Detour budget multiplier for the balanced variant (50% extra distance).
pub const DEFAULT_BALANCED_DETOUR_FACTOR: f64 = 1.5;
/// Detour budget multiplier for the most-scenic variant (100% extra distance).
pub const DEFAULT_SCENIC_DETOUR_FACTOR: f64 = 2.0;
/// Wall-clock budget (ms) for the tour solver's local search.
pub const DEFAULT_SOLVER_TIME_BUDGET_MS: u64 = 2_000;

// --- Corridor bounding box ---
// The POI search area is the start/end bounding box padded by a half-width
// proportional to the direct distance, clamped to sane bounds.

/// Corridor half-width as a fraction of the direct distance.
pub const CORRIDOR_WIDTH_FACTOR: f64 = 0.2;
/// Lower clamp (km) on the corridor half-width.
pub const CORRIDOR_WIDTH_MIN_KM: f64 = 50.0;
/// Upper clamp (km) on the corridor half-width.
pub const CORRIDOR_WIDTH_MAX_KM: f64 = 250.0;
/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

// --- Overpass retry policy ---

/// Base server-side and client-side timeout (seconds) for an Overpass query;
/// attempt `i` uses `(i + 1) ×` this value.
pub const OVERPASS_TIMEOUT_SECONDS: u64 = 180;
/// Total attempts per POI discovery call.
pub const OVERPASS_MAX_ATTEMPTS: usize = 3;
/// Base backoff (seconds) between attempts; attempt `i` waits `(i + 1) ×`.
pub const OVERPASS_BACKOFF_SECONDS: u64 = 5;

// --- Road routing ---

/// Per-leg timeout (seconds) for OSRM requests. Legs that exceed it degrade
/// to great-circle distance.
pub const OSRM_LEG_TIMEOUT_SECONDS: u64 = 10;
