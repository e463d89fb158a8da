//! Configuration loading from disk and the process environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{ApiConfig, AppConfig};
use crate::config::validation::{validate_config, ConfigIssue};

pub const ENV_NETWORK: &str = "NETWORK";
pub const ENV_MNEMONIC: &str = "MNEMONIC";
pub const ENV_ACCOUNT_INDEX: &str = "ACCOUNT_INDEX";
pub const ENV_STACKS_API_URL: &str = "STACKS_API_URL";
pub const ENV_STACKS_API_KEY: &str = "STACKS_API_KEY";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_DEFAULT_FEE: &str = "DEFAULT_FEE";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

const API_HOST_SUFFIX: &str = "_API_HOST";
const API_KEY_SUFFIX: &str = "_API_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ConfigIssue>),
    /// A required input is absent.
    Missing(&'static str),
    /// An input is present but unusable.
    InvalidValue { key: String, reason: String },
    /// A command referenced an API with no configured host.
    UnknownApi(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(issues) => {
                write!(f, "Validation failed: ")?;
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", issue)?;
                }
                Ok(())
            }
            ConfigError::Missing(key) => write!(f, "Missing required configuration: {}", key),
            ConfigError::InvalidValue { key, reason } => {
                write!(f, "Invalid value for {}: {}", key, reason)
            }
            ConfigError::UnknownApi(name) => write!(
                f,
                "No API named '{}' is configured (set {}{})",
                name,
                name.to_ascii_uppercase(),
                API_HOST_SUFFIX
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Layer environment variables over `config`.
///
/// Empty values are treated as unset. `<NAME>_API_HOST` / `<NAME>_API_KEY`
/// configure third-party APIs under the lowercased name.
pub fn apply_env<I>(config: &mut AppConfig, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut api_hosts = BTreeMap::new();
    let mut api_keys = BTreeMap::new();

    for (key, value) in vars {
        if value.trim().is_empty() {
            continue;
        }
        match key.as_str() {
            ENV_NETWORK => {
                config.network = parse_var(&key, &value)?;
            }
            ENV_MNEMONIC => config.wallet.mnemonic = Some(value),
            ENV_ACCOUNT_INDEX => config.wallet.account_index = Some(parse_var(&key, &value)?),
            ENV_STACKS_API_URL => config.node.api_url = Some(value.trim().to_string()),
            ENV_STACKS_API_KEY => config.node.api_key = Some(value),
            ENV_REQUEST_TIMEOUT_SECS => config.node.request_timeout_secs = parse_var(&key, &value)?,
            ENV_DEFAULT_FEE => config.transaction.default_fee = parse_var(&key, &value)?,
            ENV_LOG_LEVEL => config.observability.log_level = value.trim().to_string(),
            _ => {
                if let Some(name) = key.strip_suffix(API_HOST_SUFFIX) {
                    if !name.is_empty() && name != "STACKS" {
                        api_hosts.insert(name.to_ascii_lowercase(), value.trim().to_string());
                    }
                } else if let Some(name) = key.strip_suffix(API_KEY_SUFFIX) {
                    if !name.is_empty() && name != "STACKS" {
                        api_keys.insert(name.to_ascii_lowercase(), value);
                    }
                }
            }
        }
    }

    for (name, host) in api_hosts {
        config
            .apis
            .entry(name)
            .and_modify(|api| api.host = host.clone())
            .or_insert_with(|| ApiConfig::new(&host));
    }
    for (name, key) in api_keys {
        match config.apis.get_mut(&name) {
            Some(api) => api.api_key = Some(key),
            None => tracing::debug!(api = %name, "Ignoring API key without a host"),
        }
    }

    Ok(())
}

/// Load from an optional TOML file, layer `vars` on top, and validate.
pub fn load_config<I>(path: Option<&Path>, vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    load_config_with(path, vars, |_| {})
}

/// Like [`load_config`], with `overrides` applied after the environment
/// and before validation.
pub fn load_config_with<I, F>(path: Option<&Path>, vars: I, overrides: F) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
    F: FnOnce(&mut AppConfig),
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => AppConfig::default(),
    };

    apply_env(&mut config, vars)?;
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read a `.env` file from the working directory or a parent, if present.
///
/// Returns the file that was read. Call before logging is initialized and
/// report the path afterwards.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load using the process environment, then the command-line `overrides`.
pub fn load<F>(path: Option<&Path>, overrides: F) -> Result<AppConfig, ConfigError>
where
    F: FnOnce(&mut AppConfig),
{
    load_config_with(path, std::env::vars(), overrides)
}
