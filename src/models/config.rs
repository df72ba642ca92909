//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::repository::random_user::{DEFAULT_SEED, DEFAULT_SOURCE_URL};

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_seed() -> String {
    DEFAULT_SEED.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_stale_secs() -> u64 {
    5 * 60
}

fn default_gc_secs() -> u64 {
    10 * 60
}

fn default_retry_attempts() -> u32 {
    1
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the HTTP server and the command-line tools.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Endpoint of the random-user service.
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Fixed seed so identical page requests return identical records.
    #[serde(default = "default_seed")]
    pub seed: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Age after which a cached page is refetched on next access.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    /// Idle time after which an unused cached page is dropped.
    #[serde(default = "default_gc_secs")]
    pub gc_secs: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// JSON file holding the theme preference.
    pub preferences_path: String,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    pub fn gc_after(&self) -> Duration {
        Duration::from_secs(self.gc_secs)
    }
}

/// Loads [`ServerConfig`] from `config/default.yaml`, the optional
/// `config/{APP_ENV}.yaml` profile and `APP_*` environment variables.
pub fn load_server_config() -> Result<ServerConfig, ::config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    ::config::Config::builder()
        .add_source(::config::File::with_name("config/default"))
        .add_source(::config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(::config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}

#[cfg(test)]
mod tests {
    use ::config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn optional_settings_fall_back_to_defaults() {
        let yaml = r#"
address: 0.0.0.0
port: 9000
preferences_path: /tmp/prefs.json
"#;
        let config: ServerConfig = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.source_url, "https://randomuser.me/api/");
        assert_eq!(config.seed, "crm-demo");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.stale_after(), Duration::from_secs(300));
        assert_eq!(config.gc_after(), Duration::from_secs(600));
        assert_eq!(config.retry_attempts, 1);
    }
}
