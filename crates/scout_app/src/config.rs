//! Runtime configuration for `seo_scout`.
//!
//! Values come from, in increasing precedence: built-in defaults, the RON
//! config file, then CLI flags (clap already folds env vars into those).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scout_engine::{Grounding, InvokerSettings, DEFAULT_API_BASE, DEFAULT_MODEL};
use scout_logging::scout_info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "seo_scout.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub grounding: bool,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let invoker = InvokerSettings::default();
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: invoker.connect_timeout.as_secs(),
            request_timeout_secs: invoker.request_timeout.as_secs(),
            grounding: true,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Command-line values that override the file. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub no_grounding: bool,
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load `explicit` (which must exist), or `seo_scout.ron` from `cwd` when
    /// present, or the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        scout_info!("loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if overrides.no_grounding {
            self.grounding = false;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn grounding(&self) -> Grounding {
        if self.grounding {
            Grounding::Enabled
        } else {
            Grounding::Disabled
        }
    }

    pub fn invoker_settings(&self, api_key: Option<String>) -> InvokerSettings {
        InvokerSettings {
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            api_key,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
