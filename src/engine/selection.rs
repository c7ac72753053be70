//! Budgeted greedy waypoint admission: scores candidates by heritage tier and
//! notability, then admits them in score order while the running tour stays
//! within the detour budget.

use crate::engine::{geodesy, separation};
use crate::models::{path_distance_km, Coordinates, HeritageTier, Poi};

/// Base score for a UNESCO-class heritage site
const SCORE_HERITAGE_PRIMARY: f64 = 3000.0;
/// Base score for a national-class heritage site
const SCORE_HERITAGE_SECONDARY: f64 = 2000.0;
/// Base score for a POI with an external reference but no heritage listing
const SCORE_NOTABLE: f64 = 1000.0;

/// Tier base score minus distance from the direct route, so that within a
/// tier, POIs closer to the route rank higher
fn poi_score(start: &Coordinates, end: &Coordinates, poi: &Poi) -> f64 {
    let base = match poi.heritage {
        HeritageTier::Primary => SCORE_HERITAGE_PRIMARY,
        HeritageTier::Secondary => SCORE_HERITAGE_SECONDARY,
        HeritageTier::Unlisted if poi.notable => SCORE_NOTABLE,
        HeritageTier::Unlisted => 0.0,
    };
    base - geodesy::distance_to_segment(start, end, &poi.coordinates)
}

/// Select up to `max_stops` waypoints whose combined tour stays within
/// `direct_distance × detour_factor`.
///
/// Candidates are deduplicated at `min_separation_km`, scored, and walked in
/// descending score order. Each candidate is tentatively appended to the
/// accepted list and kept only if the concatenated path
/// `[start] + accepted + [end]` stays within budget; a rejected candidate
/// never stops the scan, since a later, shorter-detour POI may still fit.
/// The returned list is in acceptance order, not final tour order.
pub fn select_waypoints(
    start: &Coordinates,
    end: &Coordinates,
    candidates: &[Poi],
    detour_factor: f64,
    max_stops: usize,
    min_separation_km: f64,
) -> Vec<Poi> {
    if candidates.is_empty() || max_stops == 0 {
        return Vec::new();
    }

    let spaced = separation::deduplicate(candidates, min_separation_km);

    let direct_distance = start.distance_to(end);
    let budget = direct_distance * detour_factor;

    let mut scored: Vec<(f64, Poi)> = spaced
        .into_iter()
        .map(|poi| (poi_score(start, end, &poi), poi))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let selected = scored
        .into_iter()
        .fold(Vec::new(), |accepted: Vec<Poi>, (_, poi)| {
            if accepted.len() >= max_stops {
                return accepted;
            }

            let mut tentative: Vec<Coordinates> = Vec::with_capacity(accepted.len() + 3);
            tentative.push(*start);
            tentative.extend(accepted.iter().map(|p| p.coordinates));
            tentative.push(poi.coordinates);
            tentative.push(*end);

            if path_distance_km(&tentative) <= budget {
                let mut next = accepted;
                next.push(poi);
                next
            } else {
                accepted
            }
        });

    tracing::debug!(
        candidates = candidates.len(),
        selected = selected.len(),
        detour_factor,
        budget_km = %format!("{:.1}", budget),
        "Selected {} waypoints within {:.1}km budget",
        selected.len(),
        budget
    );

    selected
}
