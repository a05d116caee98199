pub mod env;
mod loader;

pub use env::{
    AkismetConfig, AppConfig, ConfigError, DirectoryConfig, LoggingConfig, SiteConfig, SmtpConfig,
};
pub use loader::load_config;
