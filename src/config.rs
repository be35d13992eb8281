//! # Configuration
//!
//! A show directory can carry a YAML file naming the club to compile for and
//! the Audacity project holding the label track:
//!
//! ```yaml
//! club: 2
//! labels: show.aup
//! ```
//!
//! Both keys are optional. A relative `labels` path is taken relative to the
//! config file. Command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ScriptError;
use crate::Options;

/// Club compiled for when nothing else is configured
pub const DEFAULT_CLUB: i64 = 1;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub club: Option<i64>,
    pub labels: Option<PathBuf>,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, ScriptError> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ScriptError::ConfigError(e.to_string()))?;
        if let Some(club) = config.club {
            check_club(club)?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScriptError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_yaml(&content)?;
        if let (Some(labels), Some(dir)) = (&config.labels, path.parent()) {
            if labels.is_relative() {
                config.labels = Some(dir.join(labels));
            }
        }
        Ok(config)
    }

    /// Values from `overrides` win over this config's.
    pub fn merged(self, overrides: Config) -> Self {
        Self {
            club: overrides.club.or(self.club),
            labels: overrides.labels.or(self.labels),
        }
    }

    pub fn club(&self) -> i64 {
        self.club.unwrap_or(DEFAULT_CLUB)
    }

    /// Compilation options for these settings.
    pub fn options(&self) -> Result<Options, ScriptError> {
        Ok(Options {
            club: check_club(self.club())?,
        })
    }
}

/// Club ids follow the `CLUBS` list rule: any integer but zero.
pub fn check_club(club: i64) -> Result<i64, ScriptError> {
    if club == 0 {
        return Err(ScriptError::ConfigError("club id can't be zero".to_string()));
    }
    Ok(club)
}
