//! Dynamic power and energy model.
//!
//! # Power Model
//!
//! ```text
//! V = V_base · (f / f_base)^0.8          (f_base = 1.0 GHz)
//! P = C · V² · f · m(category)
//! E = P · ticks / 1000                    (1 tick = 1 ms)
//! ```
//!
//! Idle ticks still draw power: 10% of the CPU-bound power at the
//! lowest ladder frequency (0.5 GHz), standing in for leakage and idle
//! rails.
//!
//! # Reference
//! Weste & Harris (2010), "CMOS VLSI Design", Ch. 5: Power

use serde::{Deserialize, Serialize};

use super::{Task, TaskCategory};

/// Reference frequency for voltage scaling (GHz).
pub const BASE_FREQUENCY_GHZ: f64 = 1.0;

/// Exponent of the frequency → voltage curve.
pub const VOLTAGE_SCALING_EXPONENT: f64 = 0.8;

/// Frequency at which idle power is evaluated (GHz).
pub const IDLE_FREQUENCY_GHZ: f64 = 0.5;

/// Fraction of minimum-frequency CPU-bound power drawn while idle.
pub const IDLE_POWER_FRACTION: f64 = 0.1;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: f64 = 1000.0;

/// Per-category activity multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryMultipliers {
    pub cpu_bound: f64,
    pub io_bound: f64,
    pub memory_heavy: f64,
}

impl CategoryMultipliers {
    /// Creates a multiplier set.
    pub fn new(cpu_bound: f64, io_bound: f64, memory_heavy: f64) -> Self {
        Self {
            cpu_bound,
            io_bound,
            memory_heavy,
        }
    }

    /// Multiplier for one category.
    pub fn get(&self, category: TaskCategory) -> f64 {
        match category {
            TaskCategory::CpuBound => self.cpu_bound,
            TaskCategory::IoBound => self.io_bound,
            TaskCategory::MemoryHeavy => self.memory_heavy,
        }
    }

    /// Rescales all three so that `reference` maps to 1.0.
    ///
    /// Returns `self` unchanged when the reference multiplier is not positive.
    pub fn normalized_to(&self, reference: TaskCategory) -> Self {
        let base = self.get(reference);
        if base <= 0.0 {
            return *self;
        }
        Self::new(
            self.cpu_bound / base,
            self.io_bound / base,
            self.memory_heavy / base,
        )
    }
}

impl Default for CategoryMultipliers {
    fn default() -> Self {
        Self::new(1.2, 0.6, 0.9)
    }
}

/// Converts (category, frequency) into power and energy.
///
/// Pure: the model holds only constants.
///
/// # Example
/// ```
/// use u_powersim::models::{EnergyModel, TaskCategory};
///
/// let model = EnergyModel::new();
/// let p = model.power(TaskCategory::CpuBound, 1.0);
/// // 1e-9 F · (1.2 V)² · 1e9 Hz · 1.2
/// assert!((p - 1.728).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyModel {
    /// Effective switched capacitance (F).
    pub capacitance_farads: f64,
    /// Supply voltage at the base frequency (V).
    pub base_voltage: f64,
    /// Category activity multipliers.
    pub multipliers: CategoryMultipliers,
}

impl EnergyModel {
    /// Creates a model with default constants (1 nF, 1.2 V).
    pub fn new() -> Self {
        Self::with_constants(1e-9, 1.2)
    }

    /// Creates a model with explicit capacitance and base voltage.
    pub fn with_constants(capacitance_farads: f64, base_voltage: f64) -> Self {
        Self {
            capacitance_farads,
            base_voltage,
            multipliers: CategoryMultipliers::default(),
        }
    }

    /// Replaces the category multipliers.
    pub fn with_multipliers(mut self, multipliers: CategoryMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    /// Sets all three multipliers at once.
    pub fn set_multipliers(&mut self, cpu_bound: f64, io_bound: f64, memory_heavy: f64) {
        self.multipliers = CategoryMultipliers::new(cpu_bound, io_bound, memory_heavy);
    }

    /// Supply voltage needed at `frequency_ghz`.
    pub fn voltage_for_frequency(&self, frequency_ghz: f64) -> f64 {
        let ratio = frequency_ghz / BASE_FREQUENCY_GHZ;
        self.base_voltage * ratio.powf(VOLTAGE_SCALING_EXPONENT)
    }

    /// Instantaneous power (W) of a `category` task at `frequency_ghz`.
    pub fn power(&self, category: TaskCategory, frequency_ghz: f64) -> f64 {
        let voltage = self.voltage_for_frequency(frequency_ghz);
        let frequency_hz = frequency_ghz * 1e9;
        self.capacitance_farads * voltage * voltage * frequency_hz * self.multipliers.get(category)
    }

    /// Energy (J) for running `task` for `slice_ticks` ticks.
    pub fn energy_for_slice(&self, task: &Task, frequency_ghz: f64, slice_ticks: u32) -> f64 {
        self.power(task.category(), frequency_ghz) * ticks_to_seconds(slice_ticks)
    }

    /// Power (W) drawn on an idle tick.
    pub fn idle_power(&self) -> f64 {
        self.idle_power_with_fraction(IDLE_POWER_FRACTION)
    }

    /// Idle power with a custom fraction of minimum-frequency CPU-bound power.
    pub fn idle_power_with_fraction(&self, fraction: f64) -> f64 {
        self.power(TaskCategory::CpuBound, IDLE_FREQUENCY_GHZ) * fraction
    }
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a tick count to seconds.
pub fn ticks_to_seconds(ticks: u32) -> f64 {
    ticks as f64 / TICKS_PER_SECOND
}
