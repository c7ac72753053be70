use axum::Router;
use scenicroute::config::Config;
use scenicroute::engine::RouteEngine;
use scenicroute::services::assembler::RouteAssembler;
use scenicroute::services::geocoding::NominatimClient;
use scenicroute::services::overpass::OverpassClient;
use scenicroute::services::routing::OsrmClient;
use scenicroute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenicroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting scenicroute API server");
    tracing::info!("Configuration loaded successfully");

    // Initialize services
    let engine = RouteEngine::new(config.engine.clone());
    let geocoder = NominatimClient::new(config.nominatim_url.clone());
    let overpass = OverpassClient::new(config.overpass_url.clone());
    let assembler = RouteAssembler::new(Arc::new(OsrmClient::new(config.osrm_url.clone())));

    // Create application state
    let state = Arc::new(AppState {
        engine,
        geocoder,
        overpass,
        assembler,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", scenicroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
