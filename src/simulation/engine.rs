//! Tick-loop simulation driver.
//!
//! # Tick Order
//!
//! 1. Ask the scheduler which task runs.
//! 2. If one does: execute one work unit, charge its active power to the
//!    energy accumulator and the thermal model, and hand it to the
//!    completed list if it just finished.
//! 3. Otherwise: count an idle tick and charge idle power.
//! 4. Advance the scheduler clock.
//! 5. Advance the global tick.
//!
//! # Termination
//!
//! The run stops when the tick counter reaches the configured maximum,
//! or when the scheduler holds no work and the consecutive-idle counter
//! has reached `max_idle_ticks`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{CompletedTask, SimulationStats};
use crate::models::{
    ticks_to_seconds, EnergyModel, Task, TaskId, ThermalModel, Tick, IDLE_POWER_FRACTION,
};
use crate::scheduler::{Policy, Scheduler};

/// Work units executed per tick.
pub const EXECUTION_SLICE: u32 = 1;

/// Default consecutive-idle ceiling (ticks).
pub const DEFAULT_MAX_IDLE_TICKS: Tick = 1000;

/// Driver tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Consecutive idle ticks tolerated once the scheduler is empty.
    pub max_idle_ticks: Tick,
    /// Fraction of minimum-frequency CPU-bound power drawn when idle.
    pub idle_power_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_idle_ticks: DEFAULT_MAX_IDLE_TICKS,
            idle_power_fraction: IDLE_POWER_FRACTION,
        }
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Workload loaded (or engine fresh), tick 0.
    IdleStart,
    /// At least one tick executed.
    Stepping,
    /// A termination condition was met.
    Terminated,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Executed {
        task_id: TaskId,
        frequency_ghz: f64,
        power_watts: f64,
        /// The task finished on this tick.
        completed: bool,
    },
    Idle {
        power_watts: f64,
    },
}

impl TickOutcome {
    pub fn power_watts(&self) -> f64 {
        match self {
            Self::Executed { power_watts, .. } | Self::Idle { power_watts } => *power_watts,
        }
    }
}

/// Drives one scheduler through a workload.
///
/// The engine owns the energy and thermal models and all run counters;
/// the scheduler owns the tasks until they complete.
///
/// # Example
/// ```
/// use u_powersim::models::{Task, TaskCategory};
/// use u_powersim::scheduler::RoundRobinScheduler;
/// use u_powersim::simulation::SimulationEngine;
///
/// let tasks = vec![Task::new(0, 25, TaskCategory::CpuBound)];
/// let mut engine = SimulationEngine::new(RoundRobinScheduler::new(10));
/// let stats = engine.run(&tasks, 50_000);
///
/// let done = &stats.completed_tasks[0];
/// assert_eq!(done.turnaround(), Some(25));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationEngine<S: Scheduler = Policy> {
    scheduler: S,
    energy_model: EnergyModel,
    thermal_model: ThermalModel,
    config: EngineConfig,
    phase: EnginePhase,
    max_ticks: Tick,
    tick: Tick,
    idle_streak: Tick,
    idle_ticks: Tick,
    total_energy_joules: f64,
    current_power_watts: f64,
    submitted: usize,
    completed: Vec<Task>,
}

impl<S: Scheduler> SimulationEngine<S> {
    /// Creates an engine with default models and configuration.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            energy_model: EnergyModel::new(),
            thermal_model: ThermalModel::new(),
            config: EngineConfig::default(),
            phase: EnginePhase::IdleStart,
            max_ticks: 0,
            tick: 0,
            idle_streak: 0,
            idle_ticks: 0,
            total_energy_joules: 0.0,
            current_power_watts: 0.0,
            submitted: 0,
            completed: Vec::new(),
        }
    }

    /// Replaces the energy model.
    pub fn with_energy_model(mut self, model: EnergyModel) -> Self {
        self.energy_model = model;
        self
    }

    /// Replaces the thermal model.
    pub fn with_thermal_model(mut self, model: ThermalModel) -> Self {
        self.thermal_model = model;
        self
    }

    /// Sets driver configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs `tasks` to termination and returns the statistics.
    ///
    /// Resets all state first, so repeated calls with the same input
    /// produce identical results.
    pub fn run(&mut self, tasks: &[Task], max_ticks: Tick) -> SimulationStats {
        self.load(tasks, max_ticks);
        while self.step().is_some() {}
        self.stats()
    }

    /// Resets the engine and submits `tasks` (fresh copies) to the scheduler.
    ///
    /// Only admitted tasks count toward `total_tasks`; duplicate ids are
    /// dropped by the scheduler.
    pub fn load(&mut self, tasks: &[Task], max_ticks: Tick) {
        self.reset();
        self.max_ticks = max_ticks;
        for task in tasks {
            let mut task = task.clone();
            task.reset();
            if self.scheduler.submit(task) {
                self.submitted += 1;
            }
        }
        info!(
            "{}: starting run with {} tasks, tick limit {}",
            self.scheduler.name(),
            self.submitted,
            max_ticks
        );
    }

    /// Whether another tick would execute.
    pub fn should_continue(&self) -> bool {
        self.tick < self.max_ticks
            && (self.scheduler.has_pending_or_active_work()
                || self.idle_streak < self.config.max_idle_ticks)
    }

    /// Executes one tick. Returns `None` (and enters `Terminated`) once a
    /// termination condition holds.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.phase == EnginePhase::Terminated {
            return None;
        }
        if !self.should_continue() {
            self.terminate();
            return None;
        }

        let outcome = match self.scheduler.select_for_tick() {
            Some(id) => self.execute_tick(id),
            None => self.idle_tick(),
        };

        self.scheduler.advance_tick();
        self.tick += 1;
        self.phase = EnginePhase::Stepping;
        Some(outcome)
    }

    fn execute_tick(&mut self, id: TaskId) -> TickOutcome {
        let frequency_ghz = self.scheduler.current_frequency_ghz();
        let energy_model = &self.energy_model;
        let charged = self.scheduler.execute(id, EXECUTION_SLICE).map(|task| {
            (
                energy_model.power(task.category(), frequency_ghz),
                energy_model.energy_for_slice(task, frequency_ghz, EXECUTION_SLICE),
                task.is_completed(),
            )
        });
        let Some((power_watts, energy, completed)) = charged else {
            warn!("selected task {} is not owned by the scheduler", id);
            return self.idle_tick();
        };
        self.idle_streak = 0;

        self.total_energy_joules += energy;
        self.thermal_model.update(power_watts);
        self.current_power_watts = power_watts;

        if completed {
            if let Some(mut task) = self.scheduler.notify_completed(id) {
                task.set_end_tick(self.tick + 1);
                debug!("task {} completed at tick {}", id, self.tick + 1);
                self.completed.push(task);
            }
        }

        TickOutcome::Executed {
            task_id: id,
            frequency_ghz,
            power_watts,
            completed,
        }
    }

    fn idle_tick(&mut self) -> TickOutcome {
        self.idle_streak += 1;
        self.idle_ticks += 1;

        let power_watts = self
            .energy_model
            .idle_power_with_fraction(self.config.idle_power_fraction);
        self.total_energy_joules += power_watts * ticks_to_seconds(EXECUTION_SLICE);
        self.thermal_model.update(power_watts);
        self.current_power_watts = power_watts;

        TickOutcome::Idle { power_watts }
    }

    fn terminate(&mut self) {
        self.phase = EnginePhase::Terminated;
        if self.scheduler.has_pending_or_active_work() {
            warn!(
                "{}: tick limit {} reached with {} tasks unfinished",
                self.scheduler.name(),
                self.max_ticks,
                self.scheduler.load()
            );
        }
        info!(
            "{}: finished at tick {}: {}/{} tasks, {:.6} J, peak {:.2} °C",
            self.scheduler.name(),
            self.tick,
            self.completed.len(),
            self.submitted,
            self.total_energy_joules,
            self.thermal_model.peak_temp()
        );
    }

    /// Statistics for the run so far.
    pub fn stats(&self) -> SimulationStats {
        let name = self.scheduler.name();
        SimulationStats {
            total_tasks: self.submitted,
            total_execution_time_ticks: self.tick,
            idle_ticks: self.idle_ticks,
            total_energy_joules: self.total_energy_joules,
            average_power_watts: SimulationStats::average_power(
                self.total_energy_joules,
                self.tick,
            ),
            peak_temperature_celsius: self.thermal_model.peak_temp(),
            scheduler_name: name.to_string(),
            completed_tasks: self
                .completed
                .iter()
                .map(|t| CompletedTask::from_task(t, name))
                .collect(),
        }
    }

    /// Clears the scheduler, thermal state, counters and completed list.
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.thermal_model.reset();
        self.phase = EnginePhase::IdleStart;
        self.max_ticks = 0;
        self.tick = 0;
        self.idle_streak = 0;
        self.idle_ticks = 0;
        self.total_energy_joules = 0.0;
        self.current_power_watts = 0.0;
        self.submitted = 0;
        self.completed.clear();
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Power applied on the last tick (W).
    pub fn current_power_watts(&self) -> f64 {
        self.current_power_watts
    }

    pub fn current_temperature(&self) -> f64 {
        self.thermal_model.current_temp()
    }

    pub fn total_energy_joules(&self) -> f64 {
        self.total_energy_joules
    }

    /// Tasks finished so far, in completion order.
    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access for submitting tasks mid-run.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn energy_model(&self) -> &EnergyModel {
        &self.energy_model
    }

    pub fn thermal_model(&self) -> &ThermalModel {
        &self.thermal_model
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
