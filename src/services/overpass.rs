use crate::config::EngineConfig;
use crate::constants::*;
use crate::engine::corridor;
use crate::error::{AppError, Result};
use crate::models::{CategoryFilter, Coordinates, HeritageTier, Place, Poi};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// One tag selector of the POI discovery query. Non-heritage selectors
/// require a wikipedia reference so only notable sites come back.
struct PoiSelector {
    key: &'static str,
    value: &'static str,
    require_wikipedia: bool,
    include_ways: bool,
    include_relations: bool,
}

const fn sel(
    key: &'static str,
    value: &'static str,
    require_wikipedia: bool,
    include_ways: bool,
    include_relations: bool,
) -> PoiSelector {
    PoiSelector {
        key,
        value,
        require_wikipedia,
        include_ways,
        include_relations,
    }
}

/// Heritage sites, wikipedia-referenced cultural/natural/architectural
/// sites. Node-only selectors cover point features (peaks, viewpoints, ...)
const POI_SELECTORS: &[PoiSelector] = &[
    // UNESCO World Heritage Sites
    sel("heritage", "1", false, true, true),
    // Major museums and cultural sites
    sel("tourism", "museum", true, true, false),
    sel("tourism", "gallery", true, true, false),
    // Notable castles and palaces
    sel("historic", "castle", true, true, false),
    sel("historic", "palace", true, true, false),
    // Notable religious sites
    sel("historic", "monastery", true, true, false),
    sel("historic", "cathedral", true, true, false),
    sel("historic", "church", true, true, false),
    // Notable natural features
    sel("natural", "peak", true, false, false),
    sel("natural", "volcano", true, false, false),
    sel("waterway", "waterfall", true, false, false),
    sel("natural", "beach", true, false, false),
    sel("natural", "bay", true, false, false),
    // Notable parks, gardens and viewpoints
    sel("leisure", "park", true, true, false),
    sel("leisure", "garden", true, true, false),
    sel("tourism", "viewpoint", true, false, false),
    // Historical and architectural sites
    sel("historic", "monument", true, true, false),
    sel("historic", "ruins", true, true, false),
    sel("historic", "archaeological_site", true, true, false),
    sel("historic", "memorial", true, true, false),
];

/// The POI search area: the start/end bounding box padded by the corridor
/// half-width
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// Pad the start/end bounding box by `clamp(0.2 × direct, 50, 250)` km,
/// converting the longitude padding with a latitude-dependent scale factor
pub fn corridor_bounding_box(start: &Coordinates, end: &Coordinates) -> BoundingBox {
    let direct = start.distance_to(end);
    let half_width_km =
        (direct * CORRIDOR_WIDTH_FACTOR).clamp(CORRIDOR_WIDTH_MIN_KM, CORRIDOR_WIDTH_MAX_KM);

    let mean_lat = (start.lat + end.lat) / 2.0;
    // Longitude degrees shrink toward the poles
    let lon_km_per_degree = KM_PER_DEGREE_LAT * mean_lat.to_radians().cos();

    let lat_padding = half_width_km / KM_PER_DEGREE_LAT;
    let lon_padding = half_width_km / lon_km_per_degree;

    BoundingBox {
        min_lat: start.lat.min(end.lat) - lat_padding,
        max_lat: start.lat.max(end.lat) + lat_padding,
        min_lon: start.lon.min(end.lon) - lon_padding,
        max_lon: start.lon.max(end.lon) + lon_padding,
    }
}

#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(base_url: String) -> Self {
        OverpassClient {
            client: Client::new(),
            base_url,
        }
    }

    /// Discover candidate POIs along the corridor between `start` and `end`.
    ///
    /// Returns corridor-filtered, category-filtered candidates sorted by
    /// significance (heritage first, then notable, then named-in-English,
    /// then categorized). May legitimately return an empty list.
    pub async fn find_candidates(
        &self,
        start: &Place,
        end: &Place,
        filters: &[CategoryFilter],
        engine: &EngineConfig,
    ) -> Result<Vec<Poi>> {
        let bbox = corridor_bounding_box(&start.coordinates, &end.coordinates);
        tracing::info!(
            min_lat = %format!("{:.4}", bbox.min_lat),
            min_lon = %format!("{:.4}", bbox.min_lon),
            max_lat = %format!("{:.4}", bbox.max_lat),
            max_lon = %format!("{:.4}", bbox.max_lon),
            "POI search area: ({:.4}, {:.4}) to ({:.4}, {:.4})",
            bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
        );

        let elements = self.execute_with_retry(&bbox).await?;
        let raw_count = elements.len();

        let mut pois: Vec<Poi> = elements
            .into_iter()
            .filter_map(convert_element)
            .filter(|poi| poi.matches_categories(filters))
            .filter(|poi| {
                corridor::is_on_path(
                    &start.coordinates,
                    &end.coordinates,
                    &poi.coordinates,
                    engine.corridor_detour_ratio,
                    engine.min_endpoint_proximity_km,
                )
            })
            .collect();

        // Most significant first; stable, so equal keys keep source order
        pois.sort_by_key(|poi| {
            std::cmp::Reverse((
                poi.heritage == HeritageTier::Primary,
                poi.notable,
                poi.tags.contains_key("name:en"),
                poi.category.is_some(),
            ))
        });

        tracing::info!(
            raw = raw_count,
            candidates = pois.len(),
            "Filtered {} raw elements to {} corridor candidates",
            raw_count,
            pois.len()
        );

        Ok(pois)
    }

    /// Run the discovery query with increasing timeout and backoff.
    /// Rate limiting and timeouts are retried; other failures abort early.
    async fn execute_with_retry(&self, bbox: &BoundingBox) -> Result<Vec<OverpassElement>> {
        let mut last_error = None;

        for attempt in 0..OVERPASS_MAX_ATTEMPTS {
            let timeout_secs = OVERPASS_TIMEOUT_SECONDS * (attempt as u64 + 1);
            let query = build_query(bbox, timeout_secs);

            if attempt > 0 {
                tracing::warn!(
                    attempt = attempt + 1,
                    timeout_secs,
                    "Retrying Overpass query (attempt {}/{}, {}s timeout)",
                    attempt + 1,
                    OVERPASS_MAX_ATTEMPTS,
                    timeout_secs
                );
            }

            let response_result = self
                .client
                .post(&self.base_url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(format!("data={}", urlencoding::encode(&query)))
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .send()
                .await;

            let backoff =
                std::time::Duration::from_secs(OVERPASS_BACKOFF_SECONDS * (attempt as u64 + 1));

            let response = match response_result {
                Ok(resp) => resp,
                Err(e) => {
                    let message = if e.is_timeout() {
                        "Request timed out".to_string()
                    } else {
                        format!("Request failed: {}", e)
                    };
                    tracing::warn!("Overpass {} on attempt {}", message, attempt + 1);
                    last_error = Some(AppError::OverpassApi(message));
                    if attempt + 1 < OVERPASS_MAX_ATTEMPTS {
                        tokio::time::sleep(backoff).await;
                    }
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let api_response: OverpassResponse = response.json().await.map_err(|e| {
                    AppError::OverpassApi(format!("Failed to parse response: {}", e))
                })?;
                return Ok(api_response.elements);
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!("Overpass rate limited, backing off before retry");
                last_error = Some(AppError::OverpassApi("Rate limited".to_string()));
                if attempt + 1 < OVERPASS_MAX_ATTEMPTS {
                    tokio::time::sleep(backoff).await;
                }
                continue;
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::OverpassApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::OverpassApi("All Overpass attempts failed".to_string())
        }))
    }
}

fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    let bbox_str = format!(
        "{},{},{},{}",
        bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    );

    let mut parts = vec![format!("[out:json][timeout:{}];(", timeout_secs)];
    for selector in POI_SELECTORS {
        let wiki = if selector.require_wikipedia {
            r#"["wikipedia"]"#
        } else {
            ""
        };
        let tag = format!(r#"["{}"="{}"]{}"#, selector.key, selector.value, wiki);

        parts.push(format!("node({}){};", bbox_str, tag));
        if selector.include_ways {
            parts.push(format!("way({}){};", bbox_str, tag));
        }
        if selector.include_relations {
            parts.push(format!("relation({}){};", bbox_str, tag));
        }
    }
    parts.push(");out center;".to_string());
    parts.join("\n")
}

/// Build a `Poi` from a raw element. Elements without a name or usable
/// coordinates are dropped, which upholds the candidate-set invariant.
fn convert_element(elem: OverpassElement) -> Option<Poi> {
    let original_name = elem.tags.get("name")?.clone();

    let (lat, lon) = if let (Some(lat), Some(lon)) = (elem.lat, elem.lon) {
        (lat, lon)
    } else if let Some(center) = &elem.center {
        // Ways and relations carry an `out center` centroid instead
        (center.lat, center.lon)
    } else {
        return None;
    };
    let coordinates = Coordinates::new(lat, lon).ok()?;

    // Prefer an English display name where one is tagged
    let mut name = elem
        .tags
        .get("name:en")
        .or_else(|| elem.tags.get("int_name"))
        .unwrap_or(&original_name)
        .clone();

    // An English wikipedia article title beats the raw tag
    if let Some(wiki) = elem
        .tags
        .get("wikipedia:en")
        .or_else(|| elem.tags.get("wikipedia"))
    {
        if let Some((lang, title)) = wiki.split_once(':') {
            if lang == "en" {
                name = title.replace('_', " ");
            }
        }
    }

    let heritage = HeritageTier::from_tag(elem.tags.get("heritage").map(String::as_str));
    let notable = elem.tags.contains_key("wikipedia") || elem.tags.contains_key("wikidata");
    let (category, subcategory) = match classify_tags(&elem.tags) {
        Some((c, s)) => (Some(c), Some(s)),
        None => (None, None),
    };

    Some(Poi {
        name,
        original_name,
        coordinates,
        category,
        subcategory,
        heritage,
        notable,
        tags: elem.tags,
    })
}

/// Resolve the most specific (category, subcategory) classification from the
/// raw tag set. UNESCO-class heritage wins outright; the tourism key is vague
/// and handled after the specific categories.
fn classify_tags(tags: &HashMap<String, String>) -> Option<(String, String)> {
    if tags.get("heritage").map(String::as_str) == Some("1") {
        return Some(("historic".to_string(), "UNESCO Site".to_string()));
    }

    for key in ["historic", "natural", "leisure"] {
        if let Some(value) = tags.get(key) {
            return Some((key.to_string(), title_case(value)));
        }
    }

    if let Some(tourism) = tags.get("tourism") {
        if matches!(tourism.as_str(), "museum" | "gallery" | "viewpoint") {
            return Some(("tourism".to_string(), title_case(tourism)));
        }
    }

    if let Some(building) = tags.get("building") {
        return Some(("historic".to_string(), title_case(building)));
    }
    if let Some(landuse) = tags.get("landuse") {
        if matches!(landuse.as_str(), "park" | "recreation_ground") {
            return Some(("leisure".to_string(), "park".to_string()));
        }
    }

    None
}

/// "archaeological_site" -> "Archaeological Site"
fn title_case(value: &str) -> String {
    value
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Overpass API response types

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn element(lat: f64, lon: f64, tag_pairs: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            lat: Some(lat),
            lon: Some(lon),
            center: None,
            tags: tags(tag_pairs),
        }
    }

    #[test]
    fn test_corridor_bounding_box_equator() {
        let bbox = corridor_bounding_box(&coord(0.0, 0.0), &coord(0.0, 10.0));

        // Direct distance ~1112 km, half-width 0.2x clamped to 222 km -> ~2 deg
        assert!((bbox.min_lat + 2.0).abs() < 0.1);
        assert!((bbox.max_lat - 2.0).abs() < 0.1);
        assert!((bbox.min_lon + 2.0).abs() < 0.1);
        assert!((bbox.max_lon - 12.0).abs() < 0.1);
    }

    #[test]
    fn test_corridor_half_width_clamps() {
        // Short route: half-width floors at 50 km -> ~0.45 deg of latitude
        let bbox = corridor_bounding_box(&coord(45.0, 5.0), &coord(45.1, 5.0));
        assert!((bbox.min_lat - (45.0 - 50.0 / 111.0)).abs() < 0.01);

        // Very long route: half-width caps at 250 km
        let bbox = corridor_bounding_box(&coord(0.0, 0.0), &coord(0.0, 40.0));
        assert!((bbox.min_lat + 250.0 / 111.0).abs() < 0.01);
    }

    #[test]
    fn test_build_query() {
        let bbox = BoundingBox {
            min_lat: 44.0,
            min_lon: 4.0,
            max_lat: 46.0,
            max_lon: 6.0,
        };
        let query = build_query(&bbox, 180);

        assert!(query.contains("[out:json][timeout:180]"));
        assert!(query.contains(r#"node(44,4,46,6)["heritage"="1"];"#));
        assert!(query.contains(r#"relation(44,4,46,6)["heritage"="1"];"#));
        assert!(query.contains(r#"node(44,4,46,6)["tourism"="museum"]["wikipedia"];"#));
        assert!(query.contains(r#"way(44,4,46,6)["historic"="castle"]["wikipedia"];"#));
        // Point features have no way variant
        assert!(!query.contains(r#"way(44,4,46,6)["natural"="peak"]"#));
        assert!(query.ends_with(");out center;"));
    }

    #[test]
    fn test_classify_tags_precedence() {
        assert_eq!(
            classify_tags(&tags(&[("heritage", "1"), ("historic", "castle")])),
            Some(("historic".to_string(), "UNESCO Site".to_string()))
        );
        assert_eq!(
            classify_tags(&tags(&[("historic", "archaeological_site")])),
            Some(("historic".to_string(), "Archaeological Site".to_string()))
        );
        assert_eq!(
            classify_tags(&tags(&[("tourism", "museum")])),
            Some(("tourism".to_string(), "Museum".to_string()))
        );
        // Vague tourism values fall through
        assert_eq!(classify_tags(&tags(&[("tourism", "hotel")])), None);
        assert_eq!(
            classify_tags(&tags(&[("landuse", "recreation_ground")])),
            Some(("leisure".to_string(), "park".to_string()))
        );
    }

    #[test]
    fn test_convert_element_prefers_english_names() {
        let elem = element(
            45.0,
            5.0,
            &[
                ("name", "Château de Test"),
                ("name:en", "Test Castle"),
                ("historic", "castle"),
                ("wikidata", "Q1"),
            ],
        );
        let poi = convert_element(elem).unwrap();
        assert_eq!(poi.name, "Test Castle");
        assert_eq!(poi.original_name, "Château de Test");
        assert!(poi.notable);

        // A wikipedia article title with an en prefix wins over name:en
        let elem = element(
            45.0,
            5.0,
            &[
                ("name", "Burg Test"),
                ("wikipedia", "en:Test_Fortress"),
                ("historic", "castle"),
            ],
        );
        let poi = convert_element(elem).unwrap();
        assert_eq!(poi.name, "Test Fortress");

        // Non-English wikipedia reference still marks notability
        let elem = element(
            45.0,
            5.0,
            &[
                ("name", "Burg Test"),
                ("wikipedia", "de:Test_Burg"),
                ("historic", "castle"),
            ],
        );
        let poi = convert_element(elem).unwrap();
        assert_eq!(poi.name, "Burg Test");
        assert!(poi.notable);
    }

    #[test]
    fn test_convert_element_requires_name_and_coordinates() {
        let unnamed = element(45.0, 5.0, &[("historic", "castle")]);
        assert!(convert_element(unnamed).is_none());

        let no_coords = OverpassElement {
            lat: None,
            lon: None,
            center: None,
            tags: tags(&[("name", "Ghost")]),
        };
        assert!(convert_element(no_coords).is_none());

        // A way with an out-center still converts
        let way = OverpassElement {
            lat: None,
            lon: None,
            center: Some(OverpassCenter { lat: 45.0, lon: 5.0 }),
            tags: tags(&[("name", "Area"), ("leisure", "park")]),
        };
        let poi = convert_element(way).unwrap();
        assert_eq!(poi.coordinates.lat, 45.0);
    }

    #[test]
    fn test_heritage_tier_resolution() {
        let unesco = convert_element(element(45.0, 5.0, &[("name", "X"), ("heritage", "1")]))
            .unwrap();
        assert_eq!(unesco.heritage, HeritageTier::Primary);
        assert_eq!(unesco.subcategory.as_deref(), Some("UNESCO Site"));

        let national = convert_element(element(
            45.0,
            5.0,
            &[("name", "Y"), ("heritage", "2"), ("historic", "castle")],
        ))
        .unwrap();
        assert_eq!(national.heritage, HeritageTier::Secondary);
        assert_eq!(national.subcategory.as_deref(), Some("Castle"));
    }
}
