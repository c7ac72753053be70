//! The scenic route construction engine: pure, synchronous, request-scoped.
//!
//! Stages: corridor filter (applied upstream during POI discovery) ->
//! separation filter -> budgeted waypoint selection -> tour ordering.

pub mod corridor;
pub mod geodesy;
pub mod selection;
pub mod separation;
pub mod tour;

use crate::config::EngineConfig;
use crate::models::{Coordinates, Place, Poi, Stop, Tour};
use std::time::Duration;
use tour::TourSolver;

/// Builds one tour variant from a filtered candidate set.
///
/// Cheap to clone; holds only configuration. All state is per call.
#[derive(Clone)]
pub struct RouteEngine {
    config: EngineConfig,
}

impl RouteEngine {
    pub fn new(config: EngineConfig) -> Self {
        RouteEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select waypoints under `detour_factor` and order them into a drivable
    /// tour pinned at `start` and `end`. With no admissible waypoints the
    /// result is the direct start -> end tour.
    pub fn plan_tour(
        &self,
        start: &Place,
        end: &Place,
        candidates: &[Poi],
        detour_factor: f64,
        max_stops: usize,
    ) -> Tour {
        let selected = selection::select_waypoints(
            &start.coordinates,
            &end.coordinates,
            candidates,
            detour_factor,
            max_stops,
            self.config.min_separation_km,
        );

        if selected.is_empty() {
            return Tour::direct(start, end);
        }

        let solver = TourSolver::new(Duration::from_millis(self.config.solver_time_budget_ms));
        let coords: Vec<Coordinates> = selected.iter().map(|p| p.coordinates).collect();
        let order = solver.order(&start.coordinates, &end.coordinates, &coords);

        let mut stops = Vec::with_capacity(selected.len() + 2);
        stops.push(Stop::terminus(start));
        stops.extend(order.into_iter().map(|i| Stop::waypoint(selected[i].clone())));
        stops.push(Stop::terminus(end));

        let tour = Tour::new(stops);
        tracing::info!(
            waypoints = tour.waypoint_count(),
            distance_km = %format!("{:.1}", tour.distance_km),
            detour_factor,
            "Planned tour with {} waypoints, {:.1}km",
            tour.waypoint_count(),
            tour.distance_km
        );
        tour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeritageTier;
    use std::collections::HashMap;

    fn place(name: &str, lat: f64, lon: f64) -> Place {
        Place::new(name, Coordinates::new(lat, lon).unwrap())
    }

    fn poi(name: &str, lat: f64, lon: f64, heritage: HeritageTier, notable: bool) -> Poi {
        Poi {
            name: name.to_string(),
            original_name: name.to_string(),
            coordinates: Coordinates::new(lat, lon).unwrap(),
            category: None,
            subcategory: None,
            heritage,
            notable,
            tags: HashMap::new(),
        }
    }

    fn engine() -> RouteEngine {
        RouteEngine::new(EngineConfig::default())
    }

    #[test]
    fn test_no_candidates_yields_direct_tour() {
        let start = place("A", 0.0, 0.0);
        let end = place("B", 0.0, 10.0);

        let tour = engine().plan_tour(&start, &end, &[], 2.0, 15);
        assert_eq!(tour.stops.len(), 2);
        assert_eq!(tour.waypoint_count(), 0);
    }

    #[test]
    fn test_collinear_scenario_orders_both_waypoints() {
        let start = place("Start", 0.0, 0.0);
        let end = place("End", 0.0, 10.0);
        let candidates = vec![
            poi("W2", 0.0, 7.0, HeritageTier::Unlisted, true),
            poi("W1", 0.0, 3.0, HeritageTier::Primary, true),
        ];

        let tour = engine().plan_tour(&start, &end, &candidates, 2.0, 5);

        let names: Vec<&str> = tour.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Start", "W1", "W2", "End"]);

        // All collinear, so the tour length stays at the direct distance
        let direct = start.coordinates.distance_to(&end.coordinates);
        assert!((tour.distance_km - direct).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_route_returns_direct() {
        let here = place("Here", 45.0, 5.0);
        let candidates = vec![poi("Near", 45.5, 5.0, HeritageTier::Primary, true)];

        // Zero direct distance leaves zero budget at any detour factor
        let tour = engine().plan_tour(&here, &here, &candidates, 2.0, 15);
        assert_eq!(tour.waypoint_count(), 0);
        assert_eq!(tour.distance_km, 0.0);
    }
}
