//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the core.
//! It provides:
//! 1. **Defaults:** Baseline timing constants (stage depths, unit latencies, memory size).
//! 2. **Structures:** Hierarchical config for general, pipeline, latency, memory, cache and network.
//! 3. **Validation:** `Config::validate` rejects geometries the core cannot model.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`); every field
//! has a default, so an empty object is a valid configuration.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::isa::InstKind;

/// Default configuration constants for the simulator.
///
/// The unit latencies are provisional hardware figures and are expected to be
/// overridden once target timings are confirmed.
mod defaults {
    /// Depth of the memory-access shift register.
    pub const MEMORY_STAGES: usize = 3;

    /// Depth of the pipelined add/subtract/multiply unit.
    pub const FPU_STAGES: usize = 3;

    /// Global history length of the gshare predictor.
    pub const HISTORY_BITS: u32 = 10;

    /// Initial 2-bit counter value (weakly not-taken).
    pub const INITIAL_COUNTER: u8 = 1;

    /// Busy cycles for `fdiv`.
    pub const FDIV_LATENCY: u32 = 4;

    /// Busy cycles for `fsqrt`.
    pub const FSQRT_LATENCY: u32 = 1;

    /// Busy cycles for `itof`/`ftoi`.
    pub const CONVERT_LATENCY: u32 = 0;

    /// Busy cycles for the sign and bit moves.
    pub const FMOVE_LATENCY: u32 = 0;

    /// Data memory size in 32-bit words (1 MiB).
    pub const MEMORY_WORDS: usize = 256 * 1024;

    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity.
    pub const CACHE_WAYS: usize = 2;

    /// Delay before the transmit task reconnects after a failure.
    pub const RETRY_MS: u64 = 200;
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`Config`].
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the core cannot model.
    #[error("invalid config: {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Direction predictor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predicts not-taken.
    Static,
    /// Global-history XOR pc indexed 2-bit counters.
    #[default]
    #[serde(alias = "Gshare", alias = "gshare")]
    GShare,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing and run limits.
    pub general: GeneralConfig,
    /// Stage depths and branch prediction.
    pub pipeline: PipelineConfig,
    /// Multi-cycle FPU latencies.
    pub latency: LatencyConfig,
    /// Data memory geometry.
    pub memory: MemoryConfig,
    /// Statistics-only data cache.
    pub cache: CacheConfig,
    /// External send/receive transport.
    pub network: NetworkConfig,
}

impl Config {
    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file and validates it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Checks every field against the ranges the core supports.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_owned(),
            })
        };

        if self.pipeline.memory_stages == 0 {
            return invalid("pipeline.memory_stages", "must be at least 1");
        }
        if self.pipeline.fpu_stages == 0 {
            return invalid("pipeline.fpu_stages", "must be at least 1");
        }
        if !(1..=20).contains(&self.pipeline.history_bits) {
            return invalid("pipeline.history_bits", "must be in 1..=20");
        }
        if self.pipeline.initial_counter > 3 {
            return invalid("pipeline.initial_counter", "must be a 2-bit value");
        }
        if self.memory.size_words == 0 {
            return invalid("memory.size_words", "must be non-zero");
        }
        let cache = &self.cache;
        if cache.enabled {
            for (field, value) in [
                ("cache.size_bytes", cache.size_bytes),
                ("cache.line_bytes", cache.line_bytes),
                ("cache.ways", cache.ways),
            ] {
                if !value.is_power_of_two() {
                    return invalid(field, "must be a non-zero power of two");
                }
            }
            if cache.line_bytes < 4 || cache.line_bytes * cache.ways > cache.size_bytes {
                return invalid("cache.size_bytes", "too small for line size and ways");
            }
        }
        Ok(())
    }
}

/// Tracing and run limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Emit the per-cycle pipeline trace even when not stepping verbosely.
    pub trace: bool,

    /// Upper bound on cycles for `Simulator::run`.
    pub max_cycles: Option<u64>,
}

/// Stage depths and branch prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Depth of the memory-access shift register.
    pub memory_stages: usize,

    /// Depth of the pipelined FPU shift register.
    pub fpu_stages: usize,

    /// Direction predictor.
    pub branch_predictor: BranchPredictor,

    /// Global history bits (gshare table has `2^history_bits` counters).
    pub history_bits: u32,

    /// Initial counter value for every gshare entry.
    pub initial_counter: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            memory_stages: defaults::MEMORY_STAGES,
            fpu_stages: defaults::FPU_STAGES,
            branch_predictor: BranchPredictor::default(),
            history_bits: defaults::HISTORY_BITS,
            initial_counter: defaults::INITIAL_COUNTER,
        }
    }
}

/// Busy cycles of each multi-cycle FPU operation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// `fdiv`.
    pub fdiv: u32,
    /// `fsqrt`.
    pub fsqrt: u32,
    /// `itof`, `ftoi`.
    pub convert: u32,
    /// `fneg`, `fabs`, `fmv`, `fmvif`, `fmvfi`.
    pub fmove: u32,
}

impl LatencyConfig {
    /// Busy cycles for a multi-cycle FPU kind; zero for every other kind.
    pub const fn cycles(&self, kind: InstKind) -> u32 {
        match kind {
            InstKind::Fdiv => self.fdiv,
            InstKind::Fsqrt => self.fsqrt,
            InstKind::Itof | InstKind::Ftoi => self.convert,
            InstKind::Fneg
            | InstKind::Fabs
            | InstKind::Fmv
            | InstKind::Fmvif
            | InstKind::Fmvfi => self.fmove,
            _ => 0,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            fdiv: defaults::FDIV_LATENCY,
            fsqrt: defaults::FSQRT_LATENCY,
            convert: defaults::CONVERT_LATENCY,
            fmove: defaults::FMOVE_LATENCY,
        }
    }
}

/// Data memory geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of 32-bit words.
    pub size_words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_words: defaults::MEMORY_WORDS,
        }
    }
}

/// Statistics-only data cache geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether hits and misses are tracked.
    pub enabled: bool,
    /// Total capacity in bytes.
    pub size_bytes: usize,
    /// Line size in bytes.
    pub line_bytes: usize,
    /// Associativity.
    pub ways: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// External send/receive transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address the receive task listens on.
    pub listen: Option<SocketAddr>,
    /// Address the transmit task forwards sent words to.
    pub peer: Option<SocketAddr>,
    /// Reconnect delay after a failed transmission.
    pub retry_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen: None,
            peer: None,
            retry_ms: defaults::RETRY_MS,
        }
    }
}
