use dbus::{client::DEFAULT_METHOD_TIMEOUT, endpoint::Endpoint};
use log::{debug, error};
use serde::Deserialize;
use shared::{
    error::ConfigError,
    paths::{home_config_dir, xdg_config_dir},
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, PartialEq)]
pub struct Config {
    endpoint: Endpoint,
    client_name: Option<String>,
    timeout: Duration,
}

impl Config {
    /// Loads the first existing config file among the user provided one and the
    /// XDG/HOME locations. Falls back to defaults when no file can be used.
    pub fn init(user_config: Option<&str>) -> Self {
        let config_paths: Vec<PathBuf> = [
            user_config.map(|path| PathBuf::from(shellexpand::tilde(path).as_ref())),
            xdg_config_dir(CONFIG_FILE),
            home_config_dir(CONFIG_FILE),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!("Config: Initializing");
        let config_path = config_paths.iter().find(|path| path.is_file());
        let config = Self::from_toml(TomlConfig::parse(config_path.map(PathBuf::as_path)));
        debug!("Config: Initialized");

        config
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn from_toml(toml_config: TomlConfig) -> Self {
        let TomlConfig {
            service,
            path,
            interface,
            client_name,
            timeout,
        } = toml_config;

        let default_endpoint = Endpoint::default();
        let endpoint = Endpoint {
            service: service.unwrap_or(default_endpoint.service),
            path: path.unwrap_or(default_endpoint.path),
            interface: interface.unwrap_or(default_endpoint.interface),
        };

        let timeout = timeout
            .map(|value| match parse_timeout(&value) {
                Ok(duration) => duration,
                Err(err) => {
                    error!("{err}");
                    DEFAULT_METHOD_TIMEOUT
                }
            })
            .unwrap_or(DEFAULT_METHOD_TIMEOUT);

        Self {
            endpoint,
            client_name,
            timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|_| ConfigError::InvalidValue {
        expected: "duration like '1s' or '500ms'",
        actual: value.to_string(),
    })
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    service: Option<String>,
    path: Option<String>,
    interface: Option<String>,

    /// The well-known name to own on the bus while calling, e.g. `gdigi.client`.
    client_name: Option<String>,
    timeout: Option<String>,
}

impl TomlConfig {
    fn parse(path: Option<&Path>) -> Self {
        path.and_then(|config_path| match std::fs::read_to_string(config_path) {
            Ok(content) => Some(content),
            Err(err) => {
                error!("Cannot read the config file at {config_path:?}. Error: {err}");
                None
            }
        })
        .and_then(|content| match toml::from_str(&content) {
            Ok(content) => Some(content),
            Err(error) => {
                error!("{error}");
                None
            }
        })
        .unwrap_or_default()
    }
}
