//! Simulation domain models.
//!
//! Provides the task entity and the two physical models the driver feeds
//! every tick.
//!
//! | Type | Role |
//! |------|------|
//! | Task | Unit of work with a remaining-work counter |
//! | EnergyModel | (category, frequency) → power, energy |
//! | ThermalModel | power → temperature over time |

mod energy;
mod task;
mod thermal;

pub use energy::{
    ticks_to_seconds, CategoryMultipliers, EnergyModel, BASE_FREQUENCY_GHZ, IDLE_FREQUENCY_GHZ,
    IDLE_POWER_FRACTION, TICKS_PER_SECOND,
};
pub use task::{Task, TaskCategory, TaskId, Tick};
pub use thermal::{ThermalModel, ThermalParams, DEFAULT_THROTTLE_CELSIUS};
