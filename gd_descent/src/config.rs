//! Configuration for one demo run.

use std::fs;
use std::path::{Path, PathBuf};

use gd_core::{validate_domain, Bound, CoefficientScheme, Domain, DomainError, GridResolution, DEFAULT_MIN_WIDTH};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`DemoConfig`]
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The domain failed validation
    #[error("invalid domain: {0}")]
    Domain(#[from] DomainError),
    /// Any other out-of-range setting
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Largest surface grid accepted per axis by default.
pub const DEFAULT_MAX_SAMPLES_PER_AXIS: usize = 10_001;

/// Largest step count accepted by default.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Every knob of a run. Missing JSON fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Degree of p(x)
    pub degree_x: usize,
    /// Degree of q(y)
    pub degree_y: usize,
    /// How polynomial coefficients are drawn
    pub coefficients: CoefficientScheme,
    /// Raw domain bounds, checked by [`validate_domain`]
    pub domain: Vec<Bound>,
    /// The domain span must exceed this
    pub min_domain_width: f64,
    /// Surface grid resolution
    pub resolution: GridResolution,
    /// Upper bound on grid samples per axis
    pub max_samples_per_axis: usize,
    /// Gradient weight per step
    pub learning_rate: f64,
    /// Number of descent steps
    pub steps: usize,
    /// Upper bound on `steps`
    pub max_steps: usize,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            degree_x: 2,
            degree_y: 2,
            coefficients: CoefficientScheme::default(),
            domain: vec![Bound::Int(-2), Bound::Int(2)],
            min_domain_width: DEFAULT_MIN_WIDTH,
            resolution: GridResolution::default(),
            max_samples_per_axis: DEFAULT_MAX_SAMPLES_PER_AXIS,
            learning_rate: 0.02,
            steps: 5,
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check every setting and return the validated domain.
    pub fn validate(&self) -> Result<Domain, ConfigError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "learning_rate",
                format!("must be finite and positive, got {}", self.learning_rate),
            ));
        }

        match self.resolution {
            GridResolution::Fixed { samples: 0 } => {
                return Err(ConfigError::invalid("resolution", "samples must be at least 1"));
            }
            GridResolution::PerUnit { values_per_unit: 0 } => {
                return Err(ConfigError::invalid(
                    "resolution",
                    "values_per_unit must be at least 1",
                ));
            }
            _ => {}
        }

        if self.steps > self.max_steps {
            return Err(ConfigError::invalid(
                "steps",
                format!("{} exceeds the limit of {}", self.steps, self.max_steps),
            ));
        }

        match self.coefficients {
            CoefficientScheme::Integer { low, high } if low >= high => {
                return Err(ConfigError::invalid(
                    "coefficients",
                    format!("integer range [{}, {}) is empty", low, high),
                ));
            }
            CoefficientScheme::Weighted {
                max_weight,
                min_weight,
            } if !(max_weight.is_finite() && min_weight.is_finite()) => {
                return Err(ConfigError::invalid("coefficients", "weights must be finite"));
            }
            CoefficientScheme::WeightedWithOffset {
                max_weight,
                min_weight,
                max_offset,
                min_offset,
            } if ![max_weight, min_weight, max_offset, min_offset]
                .iter()
                .all(|v| v.is_finite()) =>
            {
                return Err(ConfigError::invalid(
                    "coefficients",
                    "weights and offsets must be finite",
                ));
            }
            _ => {}
        }

        if !self.min_domain_width.is_finite() || self.min_domain_width < 0.0 {
            return Err(ConfigError::invalid(
                "min_domain_width",
                format!("must be finite and non-negative, got {}", self.min_domain_width),
            ));
        }

        let domain = validate_domain(&self.domain, self.min_domain_width)?;

        match self.resolution.samples_per_axis(&domain) {
            Some(samples) if samples <= self.max_samples_per_axis => Ok(domain),
            Some(samples) => Err(ConfigError::invalid(
                "resolution",
                format!(
                    "{} samples per axis exceeds the limit of {}",
                    samples, self.max_samples_per_axis
                ),
            )),
            None => Err(ConfigError::invalid(
                "resolution",
                "samples per axis overflows for this domain",
            )),
        }
    }

    /// The random source for this run: seeded if `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
