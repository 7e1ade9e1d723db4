use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// D4 only means something across a long rivalry; not tunable.
pub const D4_MIN_SAMPLE: usize = 12;
/// A single meeting cannot establish any pattern, whatever the caller asks for.
pub const MIN_H2H_FLOOR: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominanceConfig {
    pub min_h2h_matches: usize,
    pub d1_threshold: f64,
    pub d2_window: usize,
    pub d4_max_losses: usize,
    pub d5_streak_length: usize,
}

impl Default for DominanceConfig {
    fn default() -> Self {
        Self {
            min_h2h_matches: MIN_H2H_FLOOR,
            d1_threshold: 0.70,
            d2_window: 5,
            d4_max_losses: 4,
            d5_streak_length: 3,
        }
    }
}

impl DominanceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source; unset or blank keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(v) = read_key(&lookup, "H2H_MIN_MATCHES")? {
            cfg.min_h2h_matches = v;
        }
        if let Some(v) = read_key(&lookup, "H2H_D1_THRESHOLD")? {
            cfg.d1_threshold = v;
        }
        if let Some(v) = read_key(&lookup, "H2H_D2_WINDOW")? {
            cfg.d2_window = v;
        }
        if let Some(v) = read_key(&lookup, "H2H_D4_MAX_LOSSES")? {
            cfg.d4_max_losses = v;
        }
        if let Some(v) = read_key(&lookup, "H2H_D5_STREAK")? {
            cfg.d5_streak_length = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_h2h_matches < MIN_H2H_FLOOR {
            return Err(ConfigError::OutOfRange {
                key: "min_h2h_matches",
                detail: format!("{} < {MIN_H2H_FLOOR}", self.min_h2h_matches),
            });
        }
        if !(self.d1_threshold > 0.0 && self.d1_threshold <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "d1_threshold",
                detail: format!("{} not in (0, 1]", self.d1_threshold),
            });
        }
        if self.d2_window < 2 {
            return Err(ConfigError::OutOfRange {
                key: "d2_window",
                detail: format!("{} < 2", self.d2_window),
            });
        }
        if self.d5_streak_length == 0 {
            return Err(ConfigError::OutOfRange {
                key: "d5_streak_length",
                detail: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// History floor actually applied by the engine.
    pub fn effective_min_matches(&self) -> usize {
        self.min_h2h_matches.max(MIN_H2H_FLOOR)
    }
}

fn read_key<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::Unparseable {
            key,
            value: raw.clone(),
        })
}
