use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Official heritage recognition level of a site.
///
/// `Primary` is the UNESCO-class tier (`heritage=1` in OSM), `Secondary` the
/// national-class tier (`heritage=2`). Everything else is `Unlisted`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeritageTier {
    Primary,
    Secondary,
    #[default]
    Unlisted,
}

impl HeritageTier {
    /// Parse the OSM `heritage` tag value
    pub fn from_tag(value: Option<&str>) -> Self {
        match value {
            Some("1") => HeritageTier::Primary,
            Some("2") => HeritageTier::Secondary,
            _ => HeritageTier::Unlisted,
        }
    }
}

/// A (type, subtype) pair selecting a POI category, matched case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Display name, preferring an English form where one exists
    pub name: String,
    /// Name exactly as tagged at the source
    pub original_name: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub heritage: HeritageTier,
    /// Carries an external reference (wikipedia/wikidata tag)
    pub notable: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

impl Poi {
    /// Whether this POI passes the request's category filter.
    ///
    /// Heritage-listed sites are always included, regardless of the filter
    /// contents. An empty filter admits heritage sites only.
    pub fn matches_categories(&self, filters: &[CategoryFilter]) -> bool {
        if self.heritage == HeritageTier::Primary {
            return true;
        }

        let (Some(category), Some(subcategory)) = (&self.category, &self.subcategory) else {
            return false;
        };

        filters.iter().any(|f| {
            f.kind.eq_ignore_ascii_case(category) && f.subtype.eq_ignore_ascii_case(subcategory)
        })
    }
}
