use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub akismet_key: String,
    pub akismet: AkismetConfig,
    pub site: SiteConfig,
    pub admins_file: String,
    pub smtp: SmtpConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct AkismetConfig {
    pub service_host: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for AkismetConfig {
    fn default() -> Self {
        Self {
            service_host: "rest.akismet.com".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL sent as `blog` and prefixed to content permalinks.
    pub base_url: Url,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Option<(String, String)>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
