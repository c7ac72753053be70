use crate::error::{AppError, Result};
use crate::models::{Place, ScenicRouteRequest, ScenicRouteResponse, Tour};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/scenic
/// Plan a direct route plus two scenic variants between two place names
pub async fn create_scenic_routes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScenicRouteRequest>,
) -> Result<Json<ScenicRouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        start = %request.start_location,
        end = %request.end_location,
        max_stops = request.max_stops,
        categories = request.categories.len(),
        "Scenic route request: '{}' -> '{}', max {} stops",
        request.start_location,
        request.end_location,
        request.max_stops
    );

    // Resolve both place names; an unresolvable name fails the request
    // before the engine runs
    let (start_coords, end_coords) = tokio::join!(
        state.geocoder.geocode(&request.start_location),
        state.geocoder.geocode(&request.end_location),
    );
    let start_coords = start_coords?
        .ok_or_else(|| AppError::LocationNotFound(request.start_location.clone()))?;
    let end_coords =
        end_coords?.ok_or_else(|| AppError::LocationNotFound(request.end_location.clone()))?;

    let start = Place::new(request.start_location.clone(), start_coords);
    let end = Place::new(request.end_location.clone(), end_coords);

    // POI discovery failure degrades to a direct route, never a 5xx
    let candidates = match state
        .overpass
        .find_candidates(&start, &end, &request.categories, state.engine.config())
        .await
    {
        Ok(pois) => pois,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "POI discovery failed, continuing with an empty candidate set"
            );
            Vec::new()
        }
    };

    // The two variant passes are read-only over the same candidate set and
    // independent; run them on blocking workers concurrently
    let config = state.engine.config().clone();
    let balanced_task = {
        let engine = state.engine.clone();
        let (start, end, candidates) = (start.clone(), end.clone(), candidates.clone());
        let factor = config.balanced_detour_factor;
        let max_stops = request.max_stops / 2;
        tokio::task::spawn_blocking(move || {
            engine.plan_tour(&start, &end, &candidates, factor, max_stops)
        })
    };
    let scenic_task = {
        let engine = state.engine.clone();
        let (start, end, candidates) = (start.clone(), end.clone(), candidates);
        let factor = config.scenic_detour_factor;
        let max_stops = request.max_stops;
        tokio::task::spawn_blocking(move || {
            engine.plan_tour(&start, &end, &candidates, factor, max_stops)
        })
    };

    let (balanced_tour, scenic_tour) = tokio::join!(balanced_task, scenic_task);
    let balanced_tour = balanced_tour
        .map_err(|e| AppError::Internal(format!("Balanced route planner failed: {}", e)))?;
    let scenic_tour = scenic_tour
        .map_err(|e| AppError::Internal(format!("Most-scenic route planner failed: {}", e)))?;

    let balanced_description = format!(
        "Optimized route with {} points of interest, prioritizing travel time",
        balanced_tour.waypoint_count()
    );
    let scenic_description = format!(
        "Optimized route with {} points of interest, maximizing attractions",
        scenic_tour.waypoint_count()
    );

    let (direct_route, balanced_route, scenic_route) = tokio::join!(
        state.assembler.assemble(
            "Direct Route",
            "Direct route from start to destination",
            Tour::direct(&start, &end),
        ),
        state
            .assembler
            .assemble("Balanced Scenic Route", balanced_description, balanced_tour),
        state
            .assembler
            .assemble("Most Scenic Route", scenic_description, scenic_tour),
    );

    Ok(Json(ScenicRouteResponse {
        direct_route,
        scenic_routes: vec![balanced_route, scenic_route],
    }))
}
