use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the analysis service
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Directory for in-flight recording artifacts
    pub recordings_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "talklens".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            recordings_path: "recordings".to_string(),
        }
    }
}

impl Config {
    /// Load from an optional config file plus `TALKLENS_*` environment
    /// overrides (e.g. `TALKLENS_BACKEND__BASE_URL`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("TALKLENS").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
