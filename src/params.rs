//! Argon2 cost parameters and per-call overrides.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Default memory cost in KiB.
pub const DEFAULT_MEMORY_COST_KIB: u32 = 1024;
/// Default time cost (number of iterations).
pub const DEFAULT_TIME_COST: u32 = 3;
/// Default degree of parallelism.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Smallest accepted memory cost: the Argon2 minimum of 8 blocks per lane.
pub const MIN_MEMORY_COST_KIB: u32 = 8;
/// Smallest accepted time cost.
pub const MIN_TIME_COST: u32 = 1;
/// Smallest accepted parallelism.
pub const MIN_PARALLELISM: u32 = 1;

/// Argon2 cost parameters.
///
/// A hasher holds one `HashParams` value immutably for its lifetime.
/// Reconfiguration builds a new value through [`HashParams::new`] or the
/// `with_*` methods, all of which reject values below the cryptographic
/// minimums. Hosts that need runtime reconfiguration own the
/// synchronization themselves and swap in a freshly built hasher.
///
/// # Examples
///
/// ```rust
/// use argon2_hasher::HashParams;
///
/// let params = HashParams::default().with_memory_cost_kib(2048).unwrap();
/// assert_eq!(params.memory_cost_kib, 2048);
/// assert_eq!(params.time_cost, 3);
///
/// assert!(HashParams::default().with_time_cost(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB.
    pub memory_cost_kib: u32,
    /// Number of iterations.
    pub time_cost: u32,
    /// Requested lanes. Derivation pins the effective value to
    /// [`FIXED_PARALLELISM`](crate::hasher::FIXED_PARALLELISM).
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_cost_kib: DEFAULT_MEMORY_COST_KIB,
            time_cost: DEFAULT_TIME_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl HashParams {
    /// Creates validated cost parameters.
    ///
    /// # Arguments
    ///
    /// * `memory_cost_kib` - Memory cost in KiB, at least [`MIN_MEMORY_COST_KIB`]
    /// * `time_cost` - Number of iterations, at least [`MIN_TIME_COST`]
    /// * `parallelism` - Requested lanes, at least [`MIN_PARALLELISM`]
    ///
    /// # Returns
    ///
    /// * `Ok(HashParams)` - Parameters at or above the minimums
    /// * `Err(Error::Configuration)` - A parameter below its minimum
    pub fn new(memory_cost_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            memory_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy with the given memory cost, validated.
    pub fn with_memory_cost_kib(mut self, memory_cost_kib: u32) -> Result<Self> {
        self.memory_cost_kib = memory_cost_kib;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with the given time cost, validated.
    pub fn with_time_cost(mut self, time_cost: u32) -> Result<Self> {
        self.time_cost = time_cost;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with the given parallelism, validated.
    pub fn with_parallelism(mut self, parallelism: u32) -> Result<Self> {
        self.parallelism = parallelism;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        floor("memory_cost", self.memory_cost_kib, MIN_MEMORY_COST_KIB)?;
        floor("time_cost", self.time_cost, MIN_TIME_COST)?;
        floor("parallelism", self.parallelism, MIN_PARALLELISM)
    }
}

fn floor(name: &str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(Error::Configuration(format!(
            "{name} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

/// Per-call overrides for individual cost parameters.
///
/// A `Some` field takes precedence over the hasher's default for that
/// call only; `None` fields fall back to the defaults. All fields are
/// optional when deserialized, so the struct maps directly onto the
/// host-side `{"memory_cost": .., "time_cost": .., "threads": ..}` shape.
///
/// `threads` is accepted for contract compatibility but never forwarded:
/// derivation always runs with a single lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashOptions {
    /// Memory cost override in KiB.
    pub memory_cost: Option<u32>,
    /// Time cost override.
    pub time_cost: Option<u32>,
    /// Parallelism override. Accepted but ignored by derivation.
    pub threads: Option<u32>,
}

impl HashOptions {
    /// Resolves the effective parameters for one call.
    ///
    /// Applies the field-wise precedence rule and re-validates the result,
    /// so an out-of-range override fails the same way an out-of-range
    /// default would.
    pub fn resolve(&self, defaults: &HashParams) -> Result<HashParams> {
        HashParams::new(
            self.memory_cost.unwrap_or(defaults.memory_cost_kib),
            self.time_cost.unwrap_or(defaults.time_cost),
            self.threads.unwrap_or(defaults.parallelism),
        )
    }
}
