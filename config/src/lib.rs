//! Configuration loading for Graft.
//!
//! The raw TOML shape lives here. Engines only see the resolved values in
//! `graft-types` ([`RegistryScope`], [`DispatchTracing`]).
//!
//! ```toml
//! [logging]
//! filter = "graft=debug"
//!
//! [model]
//! registry_scope = "per_class"
//!
//! [double]
//! trace_dispatch = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use graft_types::{DispatchTracing, RegistryScope};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GRAFT_CONFIG";

/// File read from the working directory when `GRAFT_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "graft.toml";

#[derive(Debug, Default, Deserialize)]
pub struct GraftConfig {
    pub logging: Option<LoggingConfig>,
    pub model: Option<ModelConfig>,
    pub double: Option<DoubleConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. `${VAR}` references are expanded.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
    /// Default: `per_class`.
    #[serde(default)]
    pub registry_scope: RegistryScope,
}

#[derive(Debug, Default, Deserialize)]
pub struct DoubleConfig {
    /// Emit a `trace` event for every dispatched call. Default: false.
    #[serde(default)]
    pub trace_dispatch: bool,
}

impl GraftConfig {
    /// Load from `GRAFT_CONFIG`, or `./graft.toml` when unset.
    ///
    /// A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> PathBuf {
        config_path()
    }

    #[must_use]
    pub fn registry_scope(&self) -> RegistryScope {
        self.model
            .as_ref()
            .map(|model| model.registry_scope)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn dispatch_tracing(&self) -> DispatchTracing {
        self.double
            .as_ref()
            .map(|double| DispatchTracing::from(double.trace_dispatch))
            .unwrap_or_default()
    }

    /// Configured filter with environment references expanded.
    ///
    /// `None` when unset or blank after expansion.
    #[must_use]
    pub fn log_filter(&self) -> Option<String> {
        let raw = self.logging.as_ref()?.filter.as_deref()?;
        let expanded = expand_env_vars(raw);
        let trimmed = expanded.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[must_use]
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Replace `${VAR}` with the variable's value. Unset variables become empty.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
