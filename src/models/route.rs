use crate::models::{path_distance_km, Coordinates, Poi};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named location, typically a geocoded place name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Place {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Place {
            name: name.into(),
            coordinates,
        }
    }
}

/// One stop on a tour: either a terminus (start/end place) or a POI waypoint
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<Poi>,
}

impl Stop {
    pub fn terminus(place: &Place) -> Self {
        Stop {
            name: place.name.clone(),
            coordinates: place.coordinates,
            poi: None,
        }
    }

    pub fn waypoint(poi: Poi) -> Self {
        Stop {
            name: poi.name.clone(),
            coordinates: poi.coordinates,
            poi: Some(poi),
        }
    }
}

/// An ordered sequence of stops from start to end, with its cumulative
/// great-circle distance. Invariant: at least two stops, start first, end last.
#[derive(Debug, Clone, Serialize)]
pub struct Tour {
    pub stops: Vec<Stop>,
    pub distance_km: f64,
}

impl Tour {
    pub fn new(stops: Vec<Stop>) -> Self {
        let coords: Vec<Coordinates> = stops.iter().map(|s| s.coordinates).collect();
        let distance_km = path_distance_km(&coords);
        Tour { stops, distance_km }
    }

    /// Start and end only, no waypoints
    pub fn direct(start: &Place, end: &Place) -> Self {
        Tour::new(vec![Stop::terminus(start), Stop::terminus(end)])
    }

    /// Number of POI stops between the fixed endpoints
    pub fn waypoint_count(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct ScenicRouteRequest {
    pub start_location: String,
    pub end_location: String,
    #[serde(default = "default_max_stops")]
    pub max_stops: usize,
    #[serde(default)]
    pub categories: Vec<crate::models::CategoryFilter>,
}

fn default_max_stops() -> usize {
    15
}

impl ScenicRouteRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.start_location.trim().is_empty() {
            return Err("start_location is required".to_string());
        }
        if self.end_location.trim().is_empty() {
            return Err("end_location is required".to_string());
        }
        if self.max_stops > 50 {
            return Err("max_stops must be 50 or fewer".to_string());
        }
        Ok(())
    }
}

/// A tour resolved onto real roads: ordered stops plus the concatenated
/// per-leg path geometry and the total distance in meters
#[derive(Debug, Clone, Serialize)]
pub struct AssembledRoute {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub stops: Vec<Stop>,
    /// Concatenated road geometry; legs whose routing failed contribute none
    pub path: Vec<Coordinates>,
    pub distance_meters: f64,
}

#[derive(Debug, Serialize)]
pub struct ScenicRouteResponse {
    pub direct_route: AssembledRoute,
    pub scenic_routes: Vec<AssembledRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let mut req = ScenicRouteRequest {
            start_location: "Lyon".to_string(),
            end_location: "Nice".to_string(),
            max_stops: 15,
            categories: vec![],
        };
        assert!(req.validate().is_ok());

        req.start_location = "  ".to_string();
        assert!(req.validate().is_err());

        req.start_location = "Lyon".to_string();
        req.max_stops = 51;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_direct_tour() {
        let start = Place::new("A", Coordinates::new(0.0, 0.0).unwrap());
        let end = Place::new("B", Coordinates::new(0.0, 1.0).unwrap());

        let tour = Tour::direct(&start, &end);
        assert_eq!(tour.stops.len(), 2);
        assert_eq!(tour.waypoint_count(), 0);
        assert!((tour.distance_km - 111.19).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_tour_distance_is_zero() {
        let here = Place::new("Here", Coordinates::new(45.0, 5.0).unwrap());
        let tour = Tour::direct(&here, &here);
        assert_eq!(tour.distance_km, 0.0);
    }
}
