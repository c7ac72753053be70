use crate::constants::GEOCODER_USER_AGENT;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;

#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: String) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url,
        }
    }

    /// Resolve a free-text place name to its single best-match coordinate.
    /// Returns `None` when the place is unknown to the geocoder.
    pub async fn geocode(&self, place_name: &str) -> Result<Option<Coordinates>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", place_name), ("format", "json"), ("limit", "1")])
            .header("User-Agent", GEOCODER_USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::GeocodingApi(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Failed to parse response: {}", e)))?;

        let Some(first) = results.first() else {
            tracing::info!(place = place_name, "Geocoder found no match for '{}'", place_name);
            return Ok(None);
        };

        // Nominatim serializes coordinates as strings
        let lat: f64 = first
            .lat
            .parse()
            .map_err(|_| AppError::GeocodingApi(format!("Bad latitude: {}", first.lat)))?;
        let lon: f64 = first
            .lon
            .parse()
            .map_err(|_| AppError::GeocodingApi(format!("Bad longitude: {}", first.lon)))?;

        let coords = Coordinates::new(lat, lon).map_err(AppError::GeocodingApi)?;
        tracing::debug!(
            place = place_name,
            lat = coords.lat,
            lon = coords.lon,
            "Geocoded '{}' to ({:.4}, {:.4})",
            place_name,
            coords.lat,
            coords.lon
        );
        Ok(Some(coords))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_deserialization() {
        let json = r#"[{"lat": "48.8566", "lon": "2.3522", "display_name": "Paris"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "48.8566");
    }
}
