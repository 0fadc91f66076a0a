use quake_shared::config::{MapConfig, RefreshOrdering};

/// Defaults, with overrides baked in at build time (a WASM module has no
/// process environment to read at startup).
pub fn map_config() -> MapConfig {
    apply_overrides(
        MapConfig::default(),
        option_env!("QUAKE_API_URL"),
        option_env!("QUAKE_TILE_URL"),
        option_env!("QUAKE_ORDERING"),
    )
}

fn apply_overrides(
    mut config: MapConfig,
    api_url: Option<&str>,
    tile_url: Option<&str>,
    ordering: Option<&str>,
) -> MapConfig {
    if let Some(url) = api_url.filter(|s| !s.trim().is_empty()) {
        config.api_url = Some(url.trim().to_string());
    }
    if let Some(url) = tile_url.filter(|s| !s.trim().is_empty()) {
        config.tile_url = url.trim().to_string();
    }
    if let Some(raw) = ordering {
        match RefreshOrdering::parse(raw) {
            Some(o) => config.ordering = o,
            None => tracing::warn!(value = raw, "unknown QUAKE_ORDERING, keeping default"),
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides() {
        let c = apply_overrides(MapConfig::default(), None, None, None);
        assert_eq!(c, MapConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let c = apply_overrides(
            MapConfig::default(),
            Some("https://quakes.example.com/api/sismos_filtrados"),
            Some("https://tiles.example.com/{z}/{x}/{y}.png"),
            Some("last-response"),
        );
        assert_eq!(
            c.api_url.as_deref(),
            Some("https://quakes.example.com/api/sismos_filtrados")
        );
        assert_eq!(c.tile_url, "https://tiles.example.com/{z}/{x}/{y}.png");
        assert_eq!(c.ordering, RefreshOrdering::LastResponseWins);
    }

    #[test]
    fn test_blank_and_unknown_values_ignored() {
        let c = apply_overrides(MapConfig::default(), Some("  "), Some(""), Some("fastest"));
        assert_eq!(c, MapConfig::default());
    }
}
