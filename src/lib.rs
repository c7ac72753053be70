// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use engine::RouteEngine;
use services::assembler::RouteAssembler;
use services::geocoding::NominatimClient;
use services::overpass::OverpassClient;

// App state for sharing across the application
pub struct AppState {
    pub engine: RouteEngine,
    pub geocoder: NominatimClient,
    pub overpass: OverpassClient,
    pub assembler: RouteAssembler,
}
