//! Session configuration and where it is loaded from.

use std::fs::File;
use std::io::ErrorKind;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the session configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.ignite/session.yml";

/// Default prompt written before every line is read
pub const DEFAULT_PROMPT: &str = "> ";

/// Host-supplied settings for a session.
///
/// Every field has a default, so a YAML document only needs the keys it
/// changes.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Registers `colors`, which prints every known display colour.
    pub enable_colors_command: bool,
    /// Registers `exit`, which ends the session.
    pub enable_exit_command: bool,
    pub prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enable_colors_command: true,
            enable_exit_command: true,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use ignite_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/session.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/session.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = config_path_arg.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// Reads a session configuration from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid YAML for a
/// [`SessionConfig`].
pub fn read_session_config(path: &str) -> Result<SessionConfig> {
    let reader = File::open(path)
        .map_err(|e| Error::io_error("session config".to_string(), path.to_string(), e))?;

    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "session config".to_string(),
            path.to_string(),
            e,
        )
    })
}

/// Loads the session configuration.
///
/// With no explicit path, a missing file at the default location yields the
/// default configuration. An explicit path must exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// explicitly requested file does not exist.
pub fn load_session_config(config_path_arg: &Option<String>) -> Result<SessionConfig> {
    let path = get_config_path(config_path_arg);
    debug!("Session config path: `{path}`");

    match read_session_config(&path) {
        Err(Error::Io { original, .. })
            if config_path_arg.is_none() && original.kind() == ErrorKind::NotFound =>
        {
            debug!("No session config at `{path}`, using defaults");
            Ok(SessionConfig::default())
        }
        result => result,
    }
}
