//! Simulation driver and run statistics.
//!
//! [`SimulationEngine`] runs the single-threaded tick loop that couples a
//! scheduler to the energy and thermal models. A run ends in a
//! [`SimulationStats`] record; [`RunKpi`] derives comparison metrics
//! from it.

mod engine;
mod kpi;
mod stats;

pub use engine::{
    EngineConfig, EnginePhase, SimulationEngine, TickOutcome, DEFAULT_MAX_IDLE_TICKS,
    EXECUTION_SLICE,
};
pub use kpi::RunKpi;
pub use stats::{CompletedTask, SimulationStats};
