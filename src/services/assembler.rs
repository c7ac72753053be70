use crate::models::{AssembledRoute, Coordinates, Tour};
use crate::services::routing::RoadRouter;
use std::sync::Arc;
use uuid::Uuid;

/// Resolves an ordered tour onto real roads, one collaborator call per leg.
///
/// Legs are independent: they are fetched concurrently, and a failed leg
/// degrades to its great-circle distance without geometry rather than
/// failing the route.
#[derive(Clone)]
pub struct RouteAssembler {
    router: Arc<dyn RoadRouter>,
}

/// Per-leg result before concatenation
struct LegOutcome {
    path: Vec<Coordinates>,
    distance_km: f64,
}

impl RouteAssembler {
    pub fn new(router: Arc<dyn RoadRouter>) -> Self {
        RouteAssembler { router }
    }

    pub async fn assemble(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        tour: Tour,
    ) -> AssembledRoute {
        let legs: Vec<(Coordinates, Coordinates)> = tour
            .stops
            .windows(2)
            .map(|pair| (pair[0].coordinates, pair[1].coordinates))
            .collect();

        let leg_futures = legs.iter().map(|(from, to)| self.fetch_leg(from, to));
        let outcomes = futures::future::join_all(leg_futures).await;

        let mut path = Vec::new();
        let mut total_km = 0.0;
        for outcome in outcomes {
            path.extend(outcome.path);
            total_km += outcome.distance_km;
        }

        let name = name.into();
        tracing::info!(
            route = %name,
            legs = legs.len(),
            distance_km = %format!("{:.1}", total_km),
            "Assembled '{}': {} legs, {:.1}km",
            name,
            legs.len(),
            total_km
        );

        AssembledRoute {
            id: Uuid::new_v4(),
            name,
            description: description.into(),
            stops: tour.stops,
            path,
            distance_meters: total_km * 1000.0,
        }
    }

    async fn fetch_leg(&self, from: &Coordinates, to: &Coordinates) -> LegOutcome {
        match self.router.route_leg(from, to).await {
            Ok(leg) => LegOutcome {
                path: leg.path,
                distance_km: leg.distance_km,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Road routing failed for leg, falling back to great-circle distance"
                );
                LegOutcome {
                    path: Vec::new(),
                    distance_km: from.distance_to(to),
                }
            }
        }
    }
}
