//! City generation configuration
//!
//! All tunables of the generator live in [`CityConfig`]. Values can come from defaults, a JSON
//! file (missing keys fall back to defaults), and command-line overrides, in that order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CityError;

/// Configuration for a single city generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Side length of the square grid, in cells
    pub city_size: usize,
    /// Height of buildings far from the center (before jitter)
    pub min_height: f64,
    /// Height of buildings at the center (before jitter)
    pub max_height: f64,
    /// Probability that an empty cell left by the street walk becomes a building
    pub city_density: f64,
    /// Probability of spawning each side street after a full spacing run
    pub bloom_factor: f64,
    /// Probability that a street stops after a full spacing run
    pub stopping_factor: f64,
    /// Probability that a stopping street ends instead of turning
    pub blind_factor: f64,
    /// Cells advanced between branch decisions
    pub spacing: usize,
    /// Master seed; a random one is drawn when absent
    pub random_seed: Option<u64>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            city_size: 10,
            min_height: 10.0,
            max_height: 40.0,
            city_density: 0.9,
            bloom_factor: 1.0,
            stopping_factor: 0.0,
            blind_factor: 0.8,
            spacing: 6,
            random_seed: None,
        }
    }
}

impl CityConfig {
    /// Config with the given grid size and default everything else.
    pub fn with_size(city_size: usize) -> Self {
        Self {
            city_size,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Keys not present keep their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CityError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| CityError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| CityError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CityError> {
        serde_json::from_str(json).map_err(|e| CityError::ConfigLoad {
            path: Default::default(),
            message: e.to_string(),
        })
    }

    /// Serialize this config as pretty JSON.
    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value before generation starts.
    pub fn validate(&self) -> Result<(), CityError> {
        if self.city_size == 0 {
            return Err(CityError::invalid("city_size", "must be at least 1"));
        }
        if self.spacing == 0 {
            return Err(CityError::invalid("spacing", "must be at least 1"));
        }

        let probabilities = [
            ("city_density", self.city_density),
            ("bloom_factor", self.bloom_factor),
            ("stopping_factor", self.stopping_factor),
            ("blind_factor", self.blind_factor),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(CityError::invalid(
                    field,
                    format!("must be within [0, 1], got {}", value),
                ));
            }
        }

        if !self.min_height.is_finite() || self.min_height < 0.0 {
            return Err(CityError::invalid(
                "min_height",
                format!("must be a non-negative number, got {}", self.min_height),
            ));
        }
        if !self.max_height.is_finite() || self.max_height < self.min_height {
            return Err(CityError::invalid(
                "max_height",
                format!("must be at least min_height ({}), got {}", self.min_height, self.max_height),
            ));
        }

        Ok(())
    }
}
