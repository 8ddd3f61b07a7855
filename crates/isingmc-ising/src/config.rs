use isingmc_core::errors::ErrorInfo;
use isingmc_core::IsingError;
use serde::{Deserialize, Serialize};

use crate::model::Spin;
use crate::sampler::Observable;

/// YAML-configurable parameters of a single sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Lattice geometry and initial spins.
    #[serde(default)]
    pub lattice: LatticeConfig,
    /// Inverse temperature.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Number of retained samples used for statistics.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Transition attempts performed before each retained sample.
    #[serde(default = "default_sample_interval")]
    pub sample_interval: usize,
    /// Retained samples discarded before `samples` are collected.
    #[serde(default)]
    pub burn_in: usize,
    /// Cap on the number of binning levels.
    #[serde(default)]
    pub max_binning_levels: Option<usize>,
    /// Recorded observable.
    #[serde(default)]
    pub observable: Observable,
    /// Master seed for the run.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_beta() -> f64 {
    0.4
}

fn default_samples() -> usize {
    1_000
}

fn default_sample_interval() -> usize {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeConfig::default(),
            beta: default_beta(),
            samples: default_samples(),
            sample_interval: default_sample_interval(),
            burn_in: 0,
            max_binning_levels: None,
            observable: Observable::default(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, IsingError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|err| yaml_error("yaml-deserialize", err))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, IsingError> {
        serde_yaml::to_string(self).map_err(|err| yaml_error("yaml-serialize", err))
    }

    /// Checks the parameter ranges.
    pub fn validate(&self) -> Result<(), IsingError> {
        if self.lattice.side == 0 {
            return Err(invalid("lattice side must be positive", "side", self.lattice.side));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(invalid("beta must be positive and finite", "beta", self.beta));
        }
        if self.samples == 0 {
            return Err(invalid("at least one sample is required", "samples", self.samples));
        }
        Ok(())
    }
}

/// Lattice construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Side length `L` of the `L x L` lattice.
    #[serde(default = "default_side")]
    pub side: usize,
    /// Spin assigned to every site; random spins when absent.
    #[serde(default)]
    pub initial_spin: Option<Spin>,
}

fn default_side() -> usize {
    16
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            side: default_side(),
            initial_spin: None,
        }
    }
}

/// Master seed and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed for the run; sweeps derive one substream per point.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional free-form label recorded in logs.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x15_1A6C_5EED
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// A series of independent runs at different temperatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Shared run parameters; `beta` is replaced per point.
    #[serde(default)]
    pub base: RunConfig,
    /// Temperatures to visit.
    pub temperatures: TemperatureGrid,
}

impl SweepConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, IsingError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|err| yaml_error("yaml-deserialize", err))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the base run and every temperature.
    pub fn validate(&self) -> Result<(), IsingError> {
        self.base.validate()?;
        if let TemperatureGrid::Range(range) = &self.temperatures {
            if range.points == 0 {
                return Err(invalid("a temperature range needs at least one point", "points", 0));
            }
        }
        let temperatures = self.temperatures.values();
        if temperatures.is_empty() {
            return Err(invalid("no temperatures to sweep", "temperatures", 0));
        }
        for (index, temperature) in temperatures.into_iter().enumerate() {
            if !(temperature.is_finite() && temperature > 0.0) {
                return Err(
                    invalid("temperatures must be positive and finite", "temperature", temperature)
                        .with_context("index", index),
                );
            }
        }
        Ok(())
    }
}

/// Temperatures visited by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TemperatureGrid {
    /// Explicit temperatures, visited in order.
    List {
        /// Temperatures to visit.
        values: Vec<f64>,
    },
    /// Evenly spaced temperatures including both ends.
    Range(TemperatureRange),
}

impl TemperatureGrid {
    /// Expands the grid into the temperatures to visit.
    pub fn values(&self) -> Vec<f64> {
        match self {
            TemperatureGrid::List { values } => values.clone(),
            TemperatureGrid::Range(range) => range.values(),
        }
    }
}

/// Linear temperature range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// First temperature.
    pub start: f64,
    /// Last temperature.
    pub stop: f64,
    /// Number of points, both ends included.
    pub points: usize,
}

impl TemperatureRange {
    /// Evenly spaced points from `start` to `stop`.
    pub fn values(&self) -> Vec<f64> {
        match self.points {
            0 => Vec::new(),
            1 => vec![self.start],
            points => {
                let step = (self.stop - self.start) / (points - 1) as f64;
                (0..points)
                    .map(|i| self.start + step * i as f64)
                    .collect()
            }
        }
    }
}

fn invalid(message: &str, key: &str, value: impl ToString) -> IsingError {
    IsingError::Config(ErrorInfo::new("invalid-config", message).with_context(key, value))
}

fn yaml_error(code: &str, err: serde_yaml::Error) -> IsingError {
    IsingError::Serde(ErrorInfo::new(code, err.to_string()))
}
