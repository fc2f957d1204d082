//! Configuration file for reqline
//!
//! An INI file, `~/.reqline/config` unless `REQLINE_CONFIG_PATH` or
//! `--config` says otherwise:
//!
//! ```ini
//! [request]
//! url = https://api.example.com/v1/users
//! method = GET
//! timeout_secs = 10
//!
//! [view]
//! tabs = collection, request_headers, request_body, response_body
//!
//! [keys]
//! next_tab = alt+]
//! run = ctrl+r
//! ```
//!
//! A missing file yields the defaults.

use crate::cmd_args::CommandLineArgs;
use crate::repl::commands::{KeyAction, KeyBinding, KeyMap};
use crate::repl::events::Tab;
use crate::repl::services::DEFAULT_TIMEOUT;
use ini::Ini;
use std::time::Duration;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "~/.reqline/config";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV_VAR: &str = "REQLINE_CONFIG_PATH";

/// Default log file, used only when logging is enabled
pub const DEFAULT_LOG_PATH: &str = "~/.reqline/reqline.log";

const SECTION_REQUEST: &str = "request";
const SECTION_VIEW: &str = "view";
const SECTION_KEYS: &str = "keys";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: ini::Error,
    },

    #[error("[{section}] {key} = '{value}': {reason}")]
    InvalidValue {
        section: &'static str,
        key: String,
        value: String,
        reason: String,
    },

    #[error("[keys] unknown binding name '{0}'")]
    UnknownBinding(String),
}

/// Get the config file path, checking the environment variable first
pub fn get_config_path() -> String {
    std::env::var_os(CONFIG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Settings resolved from the file and the command line
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub url: Option<String>,
    pub method: Option<String>,
    pub timeout: Duration,
    pub tabs: Vec<Tab>,
    pub keymap: KeyMap,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: None,
            method: None,
            timeout: DEFAULT_TIMEOUT,
            tabs: Tab::ALL.to_vec(),
            keymap: KeyMap::default(),
        }
    }
}

impl AppConfig {
    /// Load `file_path` (tilde-expanded); a missing file gives the defaults
    pub fn load(file_path: &str) -> Result<Self, ConfigError> {
        let expanded = shellexpand::tilde(file_path).to_string();
        if !std::path::Path::new(&expanded).exists() {
            tracing::debug!("config file {} not found, using defaults", expanded);
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(&expanded).map_err(|source| ConfigError::Load {
            path: expanded.clone(),
            source,
        })?;
        tracing::debug!("loaded config from {}", expanded);
        Self::from_ini(&ini)
    }

    /// Resolve the path from the command line or environment, load it, then
    /// apply the command-line overrides
    pub fn resolve(args: &CommandLineArgs) -> Result<Self, ConfigError> {
        let path = args
            .config()
            .map(str::to_string)
            .unwrap_or_else(get_config_path);
        let mut config = Self::load(&path)?;
        config.apply_args(args);
        Ok(config)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(SECTION_REQUEST)) {
            config.url = section.get("url").map(str::to_string);
            config.method = section.get("method").map(str::to_string);
            if let Some(value) = section.get("timeout_secs") {
                let invalid = |reason: String| ConfigError::InvalidValue {
                    section: SECTION_REQUEST,
                    key: "timeout_secs".to_string(),
                    value: value.to_string(),
                    reason,
                };
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid(e.to_string()))?;
                if secs == 0 {
                    return Err(invalid("must be at least 1".to_string()));
                }
                config.timeout = Duration::from_secs(secs);
            }
        }

        if let Some(value) = ini.section(Some(SECTION_VIEW)).and_then(|s| s.get("tabs")) {
            config.tabs = parse_tabs(value)?;
        }

        if let Some(section) = ini.section(Some(SECTION_KEYS)) {
            for (key, value) in section.iter() {
                let action = KeyAction::from_config_key(key)
                    .ok_or_else(|| ConfigError::UnknownBinding(key.to_string()))?;
                let binding = value
                    .parse::<KeyBinding>()
                    .map_err(|reason| ConfigError::InvalidValue {
                        section: SECTION_KEYS,
                        key: key.to_string(),
                        value: value.to_string(),
                        reason,
                    })?;
                config.keymap.bind(action, binding);
            }
        }

        Ok(config)
    }

    pub fn apply_args(&mut self, args: &CommandLineArgs) {
        if let Some(url) = args.url() {
            self.url = Some(url.to_string());
        }
        if let Some(method) = args.method() {
            self.method = Some(method.to_string());
        }
    }
}

/// Parse a comma list of tab names. A list missing a required tab, or
/// naming one twice, falls back to the default tabs.
fn parse_tabs(value: &str) -> Result<Vec<Tab>, ConfigError> {
    let tabs = value
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<Tab>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|reason| ConfigError::InvalidValue {
            section: SECTION_VIEW,
            key: "tabs".to_string(),
            value: value.to_string(),
            reason,
        })?;

    let complete = Tab::REQUIRED.iter().all(|tab| tabs.contains(tab));
    let unique = tabs.iter().enumerate().all(|(i, tab)| !tabs[..i].contains(tab));
    if complete && unique {
        Ok(tabs)
    } else {
        tracing::warn!("[view] tabs '{}' is incomplete, using the default tabs", value);
        Ok(Tab::ALL.to_vec())
    }
}
