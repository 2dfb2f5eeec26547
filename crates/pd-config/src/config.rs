use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME,
    LoggingConfig, RemoteConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for PD_CONFIG_DIR env var, else use ./.pd/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PD_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PD_CONFIG_DIR env var > ./.pd/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config_dir("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.remote.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::logging(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the persisted session, or None when persistence is off.
    pub fn session_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        if !self.remote.persist_session {
            return Ok(None);
        }
        Ok(Some(Self::config_dir()?.join(&self.remote.session_file)))
    }

    /// Absolute path of the log file, or None for stdout.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  remote: {} (anon key {}, table '{}')",
            self.remote.url,
            if self.remote.anon_key.is_some() {
                "set"
            } else {
                "missing"
            },
            self.remote.profile_table
        );
        info!(
            "  session: persist={}, auto_refresh={}, leeway={}s, timeout={}s",
            self.remote.persist_session,
            self.remote.auto_refresh_token,
            self.remote.refresh_leeway_secs,
            self.remote.request_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Remote
        Self::apply_env_string("PD_REMOTE_URL", &mut self.remote.url);
        Self::apply_env_option_string("PD_REMOTE_ANON_KEY", &mut self.remote.anon_key);
        Self::apply_env_string("PD_REMOTE_PROFILE_TABLE", &mut self.remote.profile_table);
        Self::apply_env_bool(
            "PD_REMOTE_AUTO_REFRESH_TOKEN",
            &mut self.remote.auto_refresh_token,
        );
        Self::apply_env_bool("PD_REMOTE_PERSIST_SESSION", &mut self.remote.persist_session);
        Self::apply_env_string("PD_REMOTE_SESSION_FILE", &mut self.remote.session_file);
        Self::apply_env_parse(
            "PD_REMOTE_REQUEST_TIMEOUT_SECS",
            &mut self.remote.request_timeout_secs,
        );
        Self::apply_env_parse(
            "PD_REMOTE_REFRESH_LEEWAY_SECS",
            &mut self.remote.refresh_leeway_secs,
        );

        // Logging
        Self::apply_env_parse("PD_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PD_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PD_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
