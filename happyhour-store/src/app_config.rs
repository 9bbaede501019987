use happyhour_core::InvalidExpirationPolicy;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub features: FeatureConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Spreadsheet CSV export URL
    pub sheet_url: Option<String>,
    /// Local CSV export, used when no URL is set
    pub csv_path: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// 0 disables the background refresh
    #[serde(default)]
    pub refresh_interval_seconds: u64,
}

fn default_timeout() -> u64 { 15 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FeatureConfig {
    #[serde(default)]
    pub invalid_expiration: InvalidExpirationPolicy,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked developer overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `HAPPYHOUR__SOURCE__SHEET_URL=...`
            .add_source(config::Environment::with_prefix("HAPPYHOUR").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse configuration from an inline TOML document
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
