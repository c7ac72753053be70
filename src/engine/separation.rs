//! Minimum-separation deduplication: drops POIs crowding an already-kept one,
//! preferring notable POIs. Greedy maximal-set construction, not clustering.

use crate::models::Poi;

/// Filter `pois` so every surviving pair is at least `min_distance_km` apart.
///
/// Input is ordered notable-first (stable otherwise) and the first POI is
/// always kept; each later POI is admitted only if it clears the spacing
/// against everything already admitted. Ties fall back to input order.
pub fn deduplicate(pois: &[Poi], min_distance_km: f64) -> Vec<Poi> {
    if pois.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Poi> = pois.iter().collect();
    sorted.sort_by_key(|poi| !poi.notable);

    let mut kept: Vec<Poi> = vec![sorted[0].clone()];
    for poi in &sorted[1..] {
        let too_close = kept
            .iter()
            .any(|k| k.coordinates.distance_to(&poi.coordinates) < min_distance_km);
        if !too_close {
            kept.push((*poi).clone());
        }
    }

    tracing::debug!(
        input = pois.len(),
        kept = kept.len(),
        min_distance_km,
        "Separation filter kept {}/{} POIs",
        kept.len(),
        pois.len()
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, HeritageTier};
    use std::collections::HashMap;

    fn poi(name: &str, lat: f64, lon: f64, notable: bool) -> Poi {
        Poi {
            name: name.to_string(),
            original_name: name.to_string(),
            coordinates: Coordinates::new(lat, lon).unwrap(),
            category: None,
            subcategory: None,
            heritage: HeritageTier::Unlisted,
            notable,
            tags: HashMap::new(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(&[], 5.0).is_empty());
    }

    #[test]
    fn test_notable_poi_wins_over_close_neighbor() {
        // B is ~1 km from A; only the notable one survives
        let a = poi("A", 45.0, 5.0, true);
        let b = poi("B", 45.009, 5.0, false);

        let kept = deduplicate(&[b, a], 5.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "A");
    }

    #[test]
    fn test_output_is_pairwise_separated() {
        let pois = vec![
            poi("A", 45.0, 5.0, true),
            poi("B", 45.01, 5.0, false),  // ~1 km from A
            poi("C", 45.1, 5.0, false),   // ~11 km from A
            poi("D", 45.11, 5.0, false),  // ~1 km from C
            poi("E", 45.5, 5.0, true),    // far from everything
        ];

        let kept = deduplicate(&pois, 5.0);
        for i in 0..kept.len() {
            for j in (i + 1)..kept.len() {
                assert!(
                    kept[i].coordinates.distance_to(&kept[j].coordinates) >= 5.0,
                    "{} and {} are closer than the minimum spacing",
                    kept[i].name,
                    kept[j].name
                );
            }
        }
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Same notability, far apart: both kept, original order preserved
        let first = poi("First", 45.0, 5.0, false);
        let second = poi("Second", 46.0, 5.0, false);

        let kept = deduplicate(&[first, second], 5.0);
        assert_eq!(kept[0].name, "First");
        assert_eq!(kept[1].name, "Second");
    }
}
