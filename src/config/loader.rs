use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::core::RemapConfig;

/// Name of the configuration file searched for in the working directory and
/// its ancestors.
pub const CONFIG_FILE_NAME: &str = ".mixin-remap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {CONFIG_FILE_NAME}: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Parse and validate config from a TOML string.
///
/// Dotted interface names in `interfaces.allow` are normalized to internal
/// names; anything else that is not a plain internal name is rejected.
pub fn parse_and_validate_config(contents: &str) -> Result<RemapConfig, ConfigError> {
    let mut config = toml::from_str::<RemapConfig>(contents)?;

    for interface in &mut config.interfaces.allow {
        if interface.is_empty() || (interface.starts_with('L') && interface.ends_with(';')) {
            return Err(ConfigError::Invalid(format!(
                "interfaces.allow entry '{}' must be an internal class name such as com/example/Api",
                interface
            )));
        }
        if interface.contains('.') {
            *interface = interface.replace('.', "/");
        }
    }

    Ok(config)
}

/// Load configuration from an explicit path.
pub fn load_config_from_path(path: &Path) -> Result<RemapConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_and_validate_config(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(path: &Path) -> Option<RemapConfig> {
    match load_config_from_path(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            None
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load the nearest `.mixin-remap.toml` from `start` upwards.
pub fn load_config_from(start: PathBuf) -> RemapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RemapConfig::default()
        })
}

/// Load the nearest `.mixin-remap.toml` from the current directory upwards.
pub fn load_config() -> RemapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            RemapConfig::default()
        }
    }
}

/// Default configuration file contents, as written by `mixin-remap init`.
pub fn default_config_toml() -> String {
    let mut out = String::from("# mixin-remap configuration\n\n");
    out.push_str(&toml::to_string_pretty(&RemapConfig::default()).unwrap_or_default());
    out
}
