use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Environment variable naming the management store URL
pub const MANAGEMENT_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the management store service-role key
pub const MANAGEMENT_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub management: ManagementStoreConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Central management store holding organizations and user mappings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagementStoreConfig {
    pub url: Option<String>,
    pub service_role_key: Option<SecretString>,
}

/// Outbound HTTP settings shared by management and tenant clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout; unset leaves the client default in place
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            management: ManagementStoreConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files, `APP__*` variables, and the Supabase variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(std::env::vars().collect())
    }

    /// Load configuration with `vars` standing in for the process environment
    pub fn load_from(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        let management_url = vars.get(MANAGEMENT_URL_ENV).cloned();
        let management_key = vars.get(MANAGEMENT_KEY_ENV).cloned();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("management.url", management_url)?
            .set_override_option("management.service_role_key", management_key)?
            .build()?;

        config.try_deserialize()
    }
}

impl ManagementStoreConfig {
    /// Both settings, or a message naming what is missing
    pub fn require(&self) -> Result<(&str, &SecretString), String> {
        match (self.url.as_deref().filter(|u| !u.is_empty()), &self.service_role_key) {
            (Some(url), Some(key)) => Ok((url, key)),
            (None, _) => Err(format!(
                "{} (or APP__MANAGEMENT__URL) must be set",
                MANAGEMENT_URL_ENV
            )),
            (_, None) => Err(format!(
                "{} (or APP__MANAGEMENT__SERVICE_ROLE_KEY) must be set",
                MANAGEMENT_KEY_ENV
            )),
        }
    }
}
