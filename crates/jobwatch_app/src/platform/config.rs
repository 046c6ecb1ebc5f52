use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use jobwatch_core::DashboardConfig;
use jobwatch_engine::ClientSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILE: &str = "jobwatch.ron";
const CONFIG_ENV: &str = "JOBWATCH_CONFIG";
const SOURCE_ENV: &str = "JOBWATCH_SOURCE";

/// Settings read from `jobwatch.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service base URL (`http://...`) or a directory of fixture files.
    pub source: String,
    /// Jobs per page; defaults to 10, or 2 for fixtures.
    pub page_size: Option<u32>,
    pub visible_pages: u32,
    pub refresh_secs: u64,
    pub request_timeout_secs: u64,
    /// Address-bar hash to start from, e.g. `#?st=FAIL`.
    pub initial_hash: String,
    pub status_options: Vec<String>,
    pub log: LogDestination,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dashboard = DashboardConfig::default();
        let client = ClientSettings::default();
        Self {
            source: client.base_url,
            page_size: None,
            visible_pages: dashboard.visible_pages,
            refresh_secs: dashboard.refresh_interval.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            initial_hash: "#".to_string(),
            status_options: dashboard.status_options,
            log: LogDestination::default(),
            log_file: PathBuf::from("jobwatch.log"),
            verbose: false,
        }
    }
}

/// Where monitor data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    Fixtures(PathBuf),
}

impl AppConfig {
    pub fn data_source(&self) -> DataSource {
        let source = self.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Http(source.to_string())
        } else {
            DataSource::Fixtures(PathBuf::from(source))
        }
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        let base = match self.data_source() {
            DataSource::Http(_) => DashboardConfig::default(),
            DataSource::Fixtures(_) => DashboardConfig::for_fixtures(),
        };
        DashboardConfig {
            page_size: self.page_size.unwrap_or(base.page_size),
            visible_pages: self.visible_pages,
            refresh_interval: Duration::from_secs(self.refresh_secs),
            status_options: self.status_options.clone(),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.source.trim().to_string(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }
}

/// Path from `JOBWATCH_CONFIG`, else `./jobwatch.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the config file, falling back to defaults when it does not exist.
/// `JOBWATCH_SOURCE` overrides the `source` field.
pub fn load(path: &Path) -> Result<AppConfig> {
    let mut config = match fs::read_to_string(path) {
        Ok(text) => parse(&text).with_context(|| format!("parsing {}", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    if let Ok(source) = std::env::var(SOURCE_ENV) {
        config.source = source;
    }
    Ok(config)
}

fn parse(text: &str) -> Result<AppConfig> {
    Ok(ron::from_str(text)?)
}
