//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, HttpConfig, LogFormat, LoggingConfig, ManagementStoreConfig, ServerConfig,
};
