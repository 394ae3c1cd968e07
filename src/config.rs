use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a brochure scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Site root; relative shop and image links are resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the catalog page listing the shops
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Pause between consecutive shop visits, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where the JSON array of brochures is written
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the log backend installed by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// File that receives a copy of every log line (opened in append mode)
    #[serde(default = "default_log_file")]
    pub log_file: Option<PathBuf>,

    /// Minimum level that gets written
    #[serde(default = "default_log_level")]
    pub level: log::LevelFilter,

    /// How often the log file is rolled over
    #[serde(default)]
    pub rotation: LogRotation,
}

/// Rollover schedule for the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// One file, appended to across runs
    #[default]
    Never,
    Hourly,
    Daily,
}

fn default_base_url() -> String {
    "https://www.prospektmaschine.de".to_string()
}

fn default_catalog_path() -> String {
    "/hypermarkte/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_file() -> PathBuf {
    PathBuf::from("brochures.json")
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("scraper.log"))
}

fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_path: default_catalog_path(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
            output_file: default_output_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            level: default_log_level(),
            rotation: LogRotation::default(),
        }
    }
}

impl ScraperConfig {
    /// Create a configuration for a site other than the default one
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Override the output file
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Override the pause between shop visits
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
