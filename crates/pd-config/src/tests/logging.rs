use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, none, some};
use log::LevelFilter;
use serial_test::serial;

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    assert_eq!(LogLevel::from_str("loud").unwrap(), LogLevel(LevelFilter::Info));
    assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel(LevelFilter::Warn));
}

#[test]
#[serial]
fn given_log_env_overrides_when_load_then_applied() {
    // Given
    let (temp, _dir, _key) = setup_config_dir();
    let _level = EnvGuard::set("PD_LOG_LEVEL", "trace");
    let _file = EnvGuard::set("PD_LOG_FILE", "pd.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Trace));
    assert_that!(
        config.log_file_path().unwrap().unwrap(),
        eq(&temp.path().join("log").join("pd.log"))
    );
}

#[test]
#[serial]
fn given_no_log_file_when_log_file_path_then_none() {
    // Given
    let _env = setup_config_dir();
    let _file = EnvGuard::remove("PD_LOG_FILE");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.log_file_path().unwrap(), none());
}

#[test]
#[serial]
fn given_absolute_log_dir_when_validate_then_error() {
    // Given
    let (temp, _dir, _key) = setup_config_dir();
    let _key = EnvGuard::set("PD_REMOTE_ANON_KEY", "anon-key");
    std::fs::write(temp.path().join("config.toml"), "[logging]\ndir = \"/var/log\"").unwrap();

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    assert_that!(result.unwrap_err().section(), some(eq("logging")));
}
