//! Corridor membership test: decides whether a POI lies reasonably on the way
//! from start to end. Ignores actual road curvature; intentionally cheap and
//! conservative.

use crate::engine::geodesy::{dominant_axis, RouteAxis};
use crate::models::Coordinates;

/// Returns true if all three hold:
///
/// 1. the POI is at least `min_proximity_km` from both endpoints; waypoints
///    essentially at the endpoints add no meaningful detour;
/// 2. the detour via the POI stays within `detour_ratio` of the direct
///    distance;
/// 3. the POI shows directional progress along the route's dominant axis
///    (latitude between the endpoints' latitudes for north/south routes,
///    symmetric for longitude).
pub fn is_on_path(
    start: &Coordinates,
    end: &Coordinates,
    poi: &Coordinates,
    detour_ratio: f64,
    min_proximity_km: f64,
) -> bool {
    let start_distance = start.distance_to(poi);
    let end_distance = end.distance_to(poi);

    if start_distance < min_proximity_km || end_distance < min_proximity_km {
        return false;
    }

    let direct = start.distance_to(end);
    let via_poi = start_distance + end_distance;
    if via_poi > direct * detour_ratio {
        return false;
    }

    match dominant_axis(start, end) {
        RouteAxis::NorthSouth => {
            if start.lat < end.lat {
                poi.lat >= start.lat && poi.lat <= end.lat
            } else {
                poi.lat <= start.lat && poi.lat >= end.lat
            }
        }
        RouteAxis::EastWest => {
            if start.lon < end.lon {
                poi.lon >= start.lon && poi.lon <= end.lon
            } else {
                poi.lon <= start.lon && poi.lon >= end.lon
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    const DETOUR_RATIO: f64 = 2.0;
    const MIN_PROXIMITY_KM: f64 = 30.0;

    #[test]
    fn test_poi_at_endpoint_is_rejected() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);

        assert!(!is_on_path(&start, &end, &start, DETOUR_RATIO, MIN_PROXIMITY_KM));
        assert!(!is_on_path(&start, &end, &end, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }

    #[test]
    fn test_poi_on_direct_line_is_accepted() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);
        // On the line, ~556 km from start, well past the proximity radius
        let midway = coord(0.0, 5.0);

        assert!(is_on_path(&start, &end, &midway, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }

    #[test]
    fn test_excessive_detour_is_rejected() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);
        // Far off to the side: the detour via it more than doubles the trip
        let remote = coord(9.0, 5.0);

        assert!(!is_on_path(&start, &end, &remote, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }

    #[test]
    fn test_poi_beyond_endpoint_is_rejected() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);
        // East-west route: a POI west of the start shows no progress
        let behind = coord(0.0, -1.0);

        assert!(!is_on_path(&start, &end, &behind, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }

    #[test]
    fn test_direction_rule_follows_heading() {
        // Southbound route: latitudes must decrease from start to end
        let start = coord(10.0, 0.0);
        let end = coord(0.0, 0.0);
        let between = coord(5.0, 0.1);
        let north_of_start = coord(11.0, 0.1);

        assert!(is_on_path(&start, &end, &between, DETOUR_RATIO, MIN_PROXIMITY_KM));
        assert!(!is_on_path(&start, &end, &north_of_start, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }

    #[test]
    fn test_degenerate_route_rejects_everything() {
        let here = coord(45.0, 5.0);
        let nearby = coord(45.5, 5.0);

        // Zero direct distance leaves no detour budget at any ratio
        assert!(!is_on_path(&here, &here, &nearby, DETOUR_RATIO, MIN_PROXIMITY_KM));
    }
}
