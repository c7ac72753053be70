//! Pure great-circle helpers shared by the corridor and selection stages.

use crate::models::Coordinates;

/// Which compass axis a route predominantly follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAxis {
    NorthSouth,
    EastWest,
}

/// Classify a route by its larger coordinate delta.
/// Coarse by design; only used for the directional-progress test.
pub fn dominant_axis(start: &Coordinates, end: &Coordinates) -> RouteAxis {
    let lat_diff = (end.lat - start.lat).abs();
    let lon_diff = (end.lon - start.lon).abs();
    if lat_diff > lon_diff {
        RouteAxis::NorthSouth
    } else {
        RouteAxis::EastWest
    }
}

/// Perpendicular distance in km from `point` to the line through `start` and
/// `end`.
///
/// Projects in flat degree-space and converts the projected point back to a
/// great-circle distance. Only valid for the corridor widths used here (tens
/// to a couple hundred km); fine for filtering, not for navigation.
pub fn distance_to_segment(start: &Coordinates, end: &Coordinates, point: &Coordinates) -> f64 {
    let dx = end.lat - start.lat;
    let dy = end.lon - start.lon;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        // start == end, nothing to project onto
        return start.distance_to(point);
    }

    let t = ((point.lat - start.lat) * dx + (point.lon - start.lon) * dy) / len_sq;
    let projected = Coordinates {
        lat: start.lat + t * dx,
        lon: start.lon + t * dy,
    };

    point.distance_to(&projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(
            dominant_axis(&coord(45.0, 5.0), &coord(50.0, 6.0)),
            RouteAxis::NorthSouth
        );
        assert_eq!(
            dominant_axis(&coord(45.0, 5.0), &coord(46.0, 12.0)),
            RouteAxis::EastWest
        );
        // Equal deltas fall to east-west, matching the strict comparison
        assert_eq!(
            dominant_axis(&coord(0.0, 0.0), &coord(1.0, 1.0)),
            RouteAxis::EastWest
        );
    }

    #[test]
    fn test_collinear_point_is_on_the_line() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);
        let on_line = coord(0.0, 4.0);

        assert!(distance_to_segment(&start, &end, &on_line) < 0.01);
    }

    #[test]
    fn test_offset_point_distance() {
        let start = coord(0.0, 0.0);
        let end = coord(0.0, 10.0);
        let above = coord(1.0, 5.0);

        // One degree of latitude is ~111 km
        let d = distance_to_segment(&start, &end, &above);
        assert!((d - 111.19).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_segment_falls_back_to_distance() {
        let p = coord(45.0, 5.0);
        let q = coord(46.0, 5.0);

        let d = distance_to_segment(&p, &p, &q);
        assert!((d - p.distance_to(&q)).abs() < 1e-9);
    }
}
