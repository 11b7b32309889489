use crate::error::{ImportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the roster workbook. Only the first worksheet is read.
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Primary JSON output; the timestamped backup lands alongside it.
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Environment variable holding the Google Maps API key.
    pub api_key_env: String,
    /// Minimum milliseconds between geocoding requests.
    pub delay_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: "in/doctors.xlsx".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "out/doctors.json".to_string(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            // 25ms keeps well under the free 50qps limit
            delay_ms: 25,
            timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not
    /// exist. A file that exists but fails to parse is a fatal error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!(
                "failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
