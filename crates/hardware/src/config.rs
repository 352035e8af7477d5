//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline machine constants (memory size, table sizes, limits).
//! 2. **Structures:** Hierarchical config for general, pipeline and memory settings.
//! 3. **Enums:** Backend and branch predictor selection.
//! 4. **Validation:** Rejection of sizes the hardware model cannot represent.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`; every field is optional in JSON.

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use super::constants;

    /// Cycle budget before a run is declared runaway.
    pub const MAX_CYCLES: u64 = constants::MAX_CYCLES;

    /// Data memory capacity in words.
    pub const MEMORY_WORDS: usize = constants::MEMORY_SIZE;

    /// Branch Target Buffer entries.
    pub const BTB_SIZE: usize = constants::BTB_SIZE;

    /// Pattern table entries.
    pub const PT_SIZE: usize = constants::PT_SIZE;

    /// Initial pattern-table counter (weakly not-taken).
    pub const COUNTER_INIT: u8 = constants::COUNTER_INIT;

    /// Reorder buffer capacity.
    pub const ROB_SIZE: usize = constants::ROB_SIZE;

    /// Reservation station capacity.
    pub const RS_SIZE: usize = constants::RS_SIZE;
}

/// Backend type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BackendType {
    /// In-order pipeline with busy flags and forwarding channels (default).
    #[default]
    InOrder,
    /// Out-of-order completion through a reservation station and reorder buffer.
    OutOfOrder,
}

/// Branch predictor algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// BTB plus a pattern table of 3-bit saturating counters (default).
    #[default]
    Bimodal,
    /// Always predicts not taken.
    Static,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{BackendType, Config};
///
/// let json = r#"{ "pipeline": { "backend": "OutOfOrder", "rob_size": 16 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.backend, BackendType::OutOfOrder);
/// assert_eq!(config.pipeline.rob_size, 16);
/// assert_eq!(config.pipeline.rs_size, 4);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline, predictor and out-of-order resources
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every size and value can be represented by the model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        power_of_two("pipeline.btb_size", p.btb_size)?;
        power_of_two("pipeline.pt_size", p.pt_size)?;
        if p.rob_size < 2 {
            return Err(invalid("pipeline.rob_size", "must be at least 2"));
        }
        if p.rs_size < 2 {
            return Err(invalid("pipeline.rs_size", "must be at least 2"));
        }
        if p.counter_init > constants::COUNTER_MAX {
            return Err(invalid(
                "pipeline.counter_init",
                format!("must be at most {}", constants::COUNTER_MAX),
            ));
        }
        if self.memory.size == 0 {
            return Err(invalid("memory.size", "must be non-zero"));
        }
        if self.general.max_cycles == 0 {
            return Err(invalid("general.max_cycles", "must be non-zero"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn power_of_two(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a power of two, got {value}")))
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Print the stage occupancy after every cycle.
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Abort the run if it has not halted after this many cycles.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Pipeline and branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Backend variant
    #[serde(default)]
    pub backend: BackendType,

    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: PredictorKind,

    /// Branch Target Buffer size
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// Pattern table size
    #[serde(default = "PipelineConfig::default_pt_size")]
    pub pt_size: usize,

    /// Initial value of every pattern-table counter
    #[serde(default = "PipelineConfig::default_counter_init")]
    pub counter_init: u8,

    /// Reorder buffer capacity (out-of-order backend)
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Reservation station capacity (out-of-order backend)
    #[serde(default = "PipelineConfig::default_rs_size")]
    pub rs_size: usize,
}

impl PipelineConfig {
    const fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }

    const fn default_pt_size() -> usize {
        defaults::PT_SIZE
    }

    const fn default_counter_init() -> u8 {
        defaults::COUNTER_INIT
    }

    const fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    const fn default_rs_size() -> usize {
        defaults::RS_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            branch_predictor: PredictorKind::default(),
            btb_size: defaults::BTB_SIZE,
            pt_size: defaults::PT_SIZE,
            counter_init: defaults::COUNTER_INIT,
            rob_size: defaults::ROB_SIZE,
            rs_size: defaults::RS_SIZE,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Capacity in 32-bit words
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    const fn default_size() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_WORDS,
        }
    }
}
