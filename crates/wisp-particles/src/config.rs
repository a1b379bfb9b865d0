//! Trail configuration
//!
//! Config is resolved with three layers of precedence (highest wins):
//! 1. Environment variables: `WISP_GATE_THRESHOLD`, `WISP_RETENTION_CAP`, `WISP_SEED`, `WISP_THEME`
//! 2. A config file: the path given by the host, else `.wisp/config.toml` if present
//! 3. Built-in defaults

use crate::rand::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wisp_core::{Result, Theme, WispError};

/// Tunables for emission, retention, and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Minimum pointer travel, in pixels, before a move emits
    pub gate_threshold: f32,
    /// Particles spawned per accepted move, inclusive bounds
    pub min_particles: u32,
    pub max_particles: u32,
    /// Spawn offset per axis is drawn from [-jitter, jitter)
    pub jitter: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Horizontal drift is drawn from [-drift_x, drift_x)
    pub drift_x: f32,
    /// Upward drift magnitude, applied as a negative y
    pub drift_y_min: f32,
    pub drift_y_max: f32,
    /// Maximum live particles retained
    pub retention_cap: usize,
    /// Animation length in seconds
    pub lifetime: f32,
    pub seed: u32,
    /// Theme in effect before the first toggle
    pub theme: Theme,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            gate_threshold: 8.0,
            min_particles: 2,
            max_particles: 3,
            jitter: 10.0,
            size_min: 25.0,
            size_max: 80.0,
            drift_x: 50.0,
            drift_y_min: 40.0,
            drift_y_max: 150.0,
            retention_cap: 60,
            lifetime: 1.5,
            seed: DEFAULT_SEED,
            theme: Theme::Dark,
        }
    }
}

impl TrailConfig {
    /// Resolve defaults < file < environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let local = Self::project_config_path();
                if local.exists() {
                    Self::read_file(&local)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file only, without environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrailConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    fn project_config_path() -> PathBuf {
        PathBuf::from(".wisp").join("config.toml")
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            WispError::TomlParseError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `WISP_*` overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WISP_GATE_THRESHOLD") {
            self.gate_threshold = parse_override("WISP_GATE_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("WISP_RETENTION_CAP") {
            self.retention_cap = parse_override("WISP_RETENTION_CAP", &v)?;
        }
        if let Some(v) = lookup("WISP_SEED") {
            self.seed = parse_override("WISP_SEED", &v)?;
        }
        if let Some(v) = lookup("WISP_THEME") {
            self.theme = v.parse()?;
        }
        Ok(())
    }

    /// Reject configurations the emitter can't honor
    pub fn validate(&self) -> Result<()> {
        if !self.gate_threshold.is_finite() || self.gate_threshold < 0.0 {
            return Err(out_of_range("gate_threshold", 0.0, f64::MAX, self.gate_threshold));
        }
        if self.min_particles == 0 {
            return Err(out_of_range(
                "min_particles",
                1.0,
                self.max_particles as f64,
                self.min_particles as f32,
            ));
        }
        if self.min_particles > self.max_particles {
            return Err(WispError::ValidationError(format!(
                "min_particles ({}) exceeds max_particles ({})",
                self.min_particles, self.max_particles
            )));
        }
        if self.jitter < 0.0 || self.drift_x < 0.0 {
            return Err(WispError::ValidationError(
                "jitter and drift_x must be non-negative".into(),
            ));
        }
        if !(self.size_min > 0.0 && self.size_min < self.size_max) {
            return Err(WispError::ValidationError(format!(
                "size range [{}, {}) is empty or non-positive",
                self.size_min, self.size_max
            )));
        }
        if !(self.drift_y_min > 0.0 && self.drift_y_min <= self.drift_y_max) {
            return Err(WispError::ValidationError(format!(
                "upward drift range [{}, {}) must be positive",
                self.drift_y_min, self.drift_y_max
            )));
        }
        if self.retention_cap < self.max_particles as usize {
            return Err(out_of_range(
                "retention_cap",
                self.max_particles as f64,
                usize::MAX as f64,
                self.retention_cap as f32,
            ));
        }
        if !(self.lifetime.is_finite() && self.lifetime > 0.0) {
            return Err(out_of_range("lifetime", 0.0, f64::MAX, self.lifetime));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| WispError::ParseError(format!("{key}: invalid value '{value}'")))
}

fn out_of_range(field: &str, min: f64, max: f64, value: f32) -> WispError {
    WispError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value: value as f64,
    }
}
