use std::path::PathBuf;

use anyhow::Result;

use crate::infra::geocode::http::{GeocoderProvider, GOOGLE_GEOCODE_URL, NOMINATIM_URL};
use crate::infra::map::leaflet::MapSettings;
use crate::platform::desktop::paths::default_data_dir;
use crate::usecase::services::position::ZoomLevels;

pub const DATA_DIR_ENV: &str = "STORE_LOCATOR_DATA_DIR";
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const GEOCODER_URL_ENV: &str = "STORE_LOCATOR_GEOCODER_URL";
pub const TILE_URL_ENV: &str = "STORE_LOCATOR_TILE_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub geocoder: GeocoderProvider,
    pub map: MapSettings,
    pub zoom: ZoomLevels,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = match value(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let endpoint_override = value(GEOCODER_URL_ENV);
        let geocoder = match value(GOOGLE_API_KEY_ENV) {
            Some(api_key) => GeocoderProvider::Google {
                endpoint: endpoint_override.unwrap_or_else(|| GOOGLE_GEOCODE_URL.to_string()),
                api_key,
            },
            None => GeocoderProvider::Nominatim {
                endpoint: endpoint_override.unwrap_or_else(|| NOMINATIM_URL.to_string()),
            },
        };

        let mut map = MapSettings::default();
        if let Some(tile_url) = value(TILE_URL_ENV) {
            map.tile_url = tile_url;
        }

        Ok(Self {
            data_dir,
            geocoder,
            map,
            zoom: ZoomLevels::default(),
        })
    }

    /// Provider label for logs; never includes the API key.
    pub fn geocoder_name(&self) -> &'static str {
        match self.geocoder {
            GeocoderProvider::Nominatim { .. } => "nominatim",
            GeocoderProvider::Google { .. } => "google",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned()).expect("config should build")
    }

    #[test]
    fn defaults_to_nominatim_and_standard_zooms() {
        let config = config_from(&[(DATA_DIR_ENV, "/tmp/store-locator")]);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/store-locator"));
        assert_eq!(
            config.geocoder,
            GeocoderProvider::Nominatim {
                endpoint: NOMINATIM_URL.to_string()
            }
        );
        assert_eq!(config.zoom, ZoomLevels { record: 12, search: 15 });
        assert_eq!(config.map.zoom, 10);
    }

    #[test]
    fn google_key_switches_provider() {
        let config = config_from(&[
            (DATA_DIR_ENV, "/tmp/store-locator"),
            (GOOGLE_API_KEY_ENV, "secret"),
        ]);

        assert_eq!(config.geocoder_name(), "google");
        assert_eq!(
            config.geocoder,
            GeocoderProvider::Google {
                endpoint: GOOGLE_GEOCODE_URL.to_string(),
                api_key: "secret".to_string(),
            }
        );
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let config = config_from(&[
            (DATA_DIR_ENV, "/tmp/store-locator"),
            (GOOGLE_API_KEY_ENV, "  "),
            (GEOCODER_URL_ENV, "http://localhost:8080/search"),
            (TILE_URL_ENV, "http://tiles.local/{z}/{x}/{y}.png"),
        ]);

        assert_eq!(
            config.geocoder,
            GeocoderProvider::Nominatim {
                endpoint: "http://localhost:8080/search".to_string()
            }
        );
        assert_eq!(config.map.tile_url, "http://tiles.local/{z}/{x}/{y}.png");
    }
}
