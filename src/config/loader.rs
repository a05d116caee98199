use std::{env, time::Duration};

use url::Url;

use super::env::{
    AkismetConfig, AppConfig, ConfigError, DirectoryConfig, LoggingConfig, SiteConfig, SmtpConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let site_url = env::var("SITE_URL").map_err(|_| ConfigError::Missing("SITE_URL"))?;
        let site = SiteConfig {
            base_url: parse_site_url(&site_url)?,
            name: env::var("SITE_NAME").unwrap_or_else(|_| "Gallery".to_string()),
        };

        let akismet_key = env::var("AKISMET_KEY").unwrap_or_default();

        let defaults = AkismetConfig::default();
        let akismet = AkismetConfig {
            service_host: env::var("AKISMET_SERVICE_HOST")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.service_host),
            connect_timeout: parse_millis("AKISMET_CONNECT_TIMEOUT_MS")
                .unwrap_or(defaults.connect_timeout),
            request_timeout: parse_millis("AKISMET_REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout),
        };

        let credentials = match (env::var("SMTP_USERNAME"), env::var("SMTP_PASSWORD")) {
            (Ok(user), Ok(pass)) if !user.is_empty() => Some((user, pass)),
            _ => None,
        };
        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(25),
            credentials,
            from: env::var("MAIL_FROM").unwrap_or_else(|_| "akismet@localhost".to_string()),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            akismet_key,
            akismet,
            site,
            admins_file: env::var("ADMINS_FILE")
                .unwrap_or_else(|_| "data/admins.json".to_string()),
            smtp,
            directories,
            logging,
            timezone: env::var("NOTIFY_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
        })
    }
}

pub(crate) fn parse_site_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        name: "SITE_URL",
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name: "SITE_URL",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
}
