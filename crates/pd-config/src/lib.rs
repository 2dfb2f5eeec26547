mod config;
mod error;
mod log_level;
mod logging_config;
mod remote_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use remote_config::RemoteConfig;

const CONFIG_DIR_ENV: &str = "PD_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".pd";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:54321";
pub const DEFAULT_PROFILE_TABLE: &str = "user_profile";
const DEFAULT_SESSION_FILE: &str = "session.json";
const DEFAULT_AUTO_REFRESH_TOKEN: bool = true;
const DEFAULT_PERSIST_SESSION: bool = true;

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const MAX_REFRESH_LEEWAY_SECS: u64 = 600;
pub const DEFAULT_REFRESH_LEEWAY_SECS: u64 = 60;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
