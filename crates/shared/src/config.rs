use crate::filter::FilterDefaults;
use crate::models::LatLng;

/// How overlapping refreshes are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshOrdering {
    /// Only the most recently issued request may update the map.
    #[default]
    LastRequestWins,
    /// Every response is applied as it arrives.
    LastResponseWins,
}

impl RefreshOrdering {
    /// Parse `last-request` / `last-response`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-request" => Some(RefreshOrdering::LastRequestWins),
            "last-response" => Some(RefreshOrdering::LastResponseWins),
            _ => None,
        }
    }
}

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_COPYRIGHT_URL: &str = "https://www.openstreetmap.org/copyright";
pub const QUAKES_API_PATH: &str = "/api/sismos_filtrados";

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    /// Zoom used when recentering on the first event of a response.
    pub follow_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub tile_subdomains: Vec<char>,
    pub attribution_label: String,
    pub attribution_url: String,
    /// Absolute endpoint URL; `None` means same origin + `api_path`.
    pub api_url: Option<String>,
    pub api_path: String,
    pub filter_defaults: FilterDefaults,
    pub ordering: RefreshOrdering,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(0.0, 0.0),
            default_zoom: 2,
            follow_zoom: 3,
            max_zoom: 18,
            tile_url: OSM_TILE_URL.to_string(),
            tile_subdomains: vec!['a', 'b', 'c'],
            attribution_label: "OpenStreetMap".to_string(),
            attribution_url: OSM_COPYRIGHT_URL.to_string(),
            api_url: None,
            api_path: QUAKES_API_PATH.to_string(),
            filter_defaults: FilterDefaults::default(),
            ordering: RefreshOrdering::default(),
        }
    }
}

impl MapConfig {
    /// Endpoint to query, given the page origin.
    pub fn endpoint(&self, origin: &str) -> String {
        match &self.api_url {
            Some(url) => url.clone(),
            None => format!("{}{}", origin.trim_end_matches('/'), self.api_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MapConfig::default();
        assert_eq!(c.default_center, LatLng::new(0.0, 0.0));
        assert_eq!(c.default_zoom, 2);
        assert_eq!(c.follow_zoom, 3);
        assert_eq!(c.max_zoom, 18);
        assert_eq!(c.ordering, RefreshOrdering::LastRequestWins);
    }

    #[test]
    fn test_endpoint_same_origin() {
        let c = MapConfig::default();
        assert_eq!(
            c.endpoint("http://localhost:5000/"),
            "http://localhost:5000/api/sismos_filtrados"
        );
    }

    #[test]
    fn test_endpoint_override() {
        let c = MapConfig {
            api_url: Some("https://quakes.example.com/api/sismos_filtrados".to_string()),
            ..Default::default()
        };
        assert_eq!(
            c.endpoint("http://localhost:5000"),
            "https://quakes.example.com/api/sismos_filtrados"
        );
    }

    #[test]
    fn test_parse_ordering() {
        assert_eq!(
            RefreshOrdering::parse("last-response"),
            Some(RefreshOrdering::LastResponseWins)
        );
        assert_eq!(
            RefreshOrdering::parse(" Last-Request "),
            Some(RefreshOrdering::LastRequestWins)
        );
        assert_eq!(RefreshOrdering::parse("newest"), None);
    }
}
