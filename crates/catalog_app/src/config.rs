use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_engine::SearchSettings;
use catalog_logging::{catalog_info, catalog_warn};
use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "catalog.ron";

#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Search the product catalog from the terminal")]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
    /// Catalog site id, e.g. MLA or MLB.
    #[arg(long)]
    pub site: Option<String>,
    /// Base URL of the search API.
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub site_id: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub result_limit: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            base_url: settings.base_url,
            site_id: settings.site_id,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            max_bytes: settings.max_bytes,
            result_limit: settings.result_limit,
        }
    }
}

impl AppConfig {
    /// Reads a RON config. A missing file is not an error and yields
    /// `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// File values with CLI overrides applied; falls back to defaults when
    /// the file is missing or broken.
    pub fn load(cli: &Cli) -> Self {
        let mut config = match Self::read(&cli.config) {
            Ok(Some(config)) => {
                catalog_info!("Loaded config from {:?}", cli.config);
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                catalog_warn!("{}; using defaults", err);
                Self::default()
            }
        };
        if let Some(site) = &cli.site {
            config.site_id = site.clone();
        }
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        config
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            base_url: self.base_url.clone(),
            site_id: self.site_id.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            result_limit: self.result_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::{AppConfig, Cli};

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("catalog").chain(args.iter().copied()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");
        let config = AppConfig::load(&cli(&["--config", path.to_str().unwrap()]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(site_id: \"MLB\", result_limit: Some(20))").unwrap();

        let config = AppConfig::read(&path).unwrap().unwrap();
        assert_eq!(config.site_id, "MLB");
        assert_eq!(config.result_limit, Some(20));
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn broken_file_is_a_parse_error_and_load_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(site_id: ").unwrap();

        assert!(AppConfig::read(&path).is_err());
        let config = AppConfig::load(&cli(&["--config", path.to_str().unwrap()]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(site_id: \"MLB\")").unwrap();

        let config = AppConfig::load(&cli(&[
            "--config",
            path.to_str().unwrap(),
            "--site",
            "MLM",
            "--base-url",
            "http://localhost:9000",
        ]));
        assert_eq!(config.site_id, "MLM");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn settings_carry_timeouts() {
        let config = AppConfig {
            request_timeout_secs: 3,
            ..AppConfig::default()
        };
        assert_eq!(config.search_settings().request_timeout.as_secs(), 3);
    }
}
