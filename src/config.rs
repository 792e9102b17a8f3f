use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

const USER_CONFIG_FILENAME: &str = "atlas.toml";
const TILES_BASE: &str = "https://api.maptiler.com/maps";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CountriesSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MapSettings {
    pub tiler_key: String,
    pub style: String,
    pub boundaries_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl MapSettings {
    /// Style document URL with the API key masked, for logs.
    pub fn redacted_style_url(&self) -> String {
        format!("{}/{}/style.json?key=***", TILES_BASE, self.style)
    }

    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        format!(
            "{}/{}/256/{}/{}/{}.png?key={}",
            TILES_BASE, self.style, z, x, y, self.tiler_key
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub countries: CountriesSettings,
    pub map: MapSettings,
    pub log_level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(user_config_path())
    }

    /// Builds settings from defaults, optional files and `ATLAS__*` variables.
    pub fn load(user_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("countries.base_url", "https://restcountries.com/v3.1/alpha")?
            .set_default("countries.timeout_secs", 10)?
            .set_default("map.tiler_key", "")?
            .set_default("map.style", "streets")?
            .set_default("map.width", 1024)?
            .set_default("map.height", 640)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("config/default").required(false));

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let s = builder
            .add_source(Environment::with_prefix("ATLAS").separator("__"))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.countries.base_url = settings
            .countries
            .base_url
            .trim_end_matches('/')
            .to_string();
        validate_settings(&settings)?;
        Ok(settings)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "country-atlas", "CountryAtlas")
        .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILENAME))
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    let mut bad = Vec::new();

    let base = settings.countries.base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        bad.push("countries.base_url");
    }
    if settings.map.tiler_key.trim().is_empty() {
        bad.push("map.tiler_key");
    }
    if settings.map.width == 0 {
        bad.push("map.width");
    }
    if settings.map.height == 0 {
        bad.push("map.height");
    }

    if !bad.is_empty() {
        return Err(ConfigError::Message(format!(
            "invalid configuration (missing or malformed): {}",
            bad.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapSettings {
        MapSettings {
            tiler_key: "abc123".to_string(),
            style: "streets".to_string(),
            boundaries_path: None,
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_style_and_tile_urls() {
        let map = sample();
        assert_eq!(
            map.redacted_style_url(),
            "https://api.maptiler.com/maps/streets/style.json?key=***"
        );
        assert!(!map.redacted_style_url().contains("abc123"));
        assert_eq!(
            map.tile_url(1, 0, 1),
            "https://api.maptiler.com/maps/streets/256/1/0/1.png?key=abc123"
        );
    }

    #[test]
    fn test_validation_lists_every_problem() {
        let settings = Settings {
            countries: CountriesSettings {
                base_url: "ftp://example.com".to_string(),
                timeout_secs: 10,
            },
            map: MapSettings {
                tiler_key: "  ".to_string(),
                ..sample()
            },
            log_level: "info".to_string(),
        };
        let err = validate_settings(&settings).unwrap_err().to_string();
        assert!(err.contains("countries.base_url"));
        assert!(err.contains("map.tiler_key"));
        assert!(!err.contains("map.width"));
    }
}
