//! Seeded task generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Task, TaskCategory, TaskId};

/// Relative likelihood of each category. Normalized by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub cpu_bound: f64,
    pub io_bound: f64,
    pub memory_heavy: f64,
}

impl CategoryWeights {
    /// Validated, normalized weights.
    pub fn new(cpu_bound: f64, io_bound: f64, memory_heavy: f64) -> Result<Self, ConfigError> {
        let weights = [cpu_bound, io_bound, memory_heavy];
        let total: f64 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
            return Err(ConfigError::CategoryWeights);
        }
        Ok(Self {
            cpu_bound: cpu_bound / total,
            io_bound: io_bound / total,
            memory_heavy: memory_heavy / total,
        })
    }

    /// Maps a uniform draw in `[0, 1)` to a category.
    pub fn pick(&self, draw: f64) -> TaskCategory {
        if draw < self.cpu_bound {
            TaskCategory::CpuBound
        } else if draw < self.cpu_bound + self.io_bound {
            TaskCategory::IoBound
        } else {
            TaskCategory::MemoryHeavy
        }
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            cpu_bound: 0.4,
            io_bound: 0.3,
            memory_heavy: 0.3,
        }
    }
}

/// Reproducible random task source.
///
/// # Example
/// ```
/// use u_powersim::workload::TaskGenerator;
///
/// let a = TaskGenerator::new(42).generate(10, 50, 200);
/// let b = TaskGenerator::new(42).generate(10, 50, 200);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|t| (50..=200).contains(&t.duration())));
/// ```
#[derive(Debug, Clone)]
pub struct TaskGenerator {
    rng: StdRng,
    weights: CategoryWeights,
    min_priority: i32,
    max_priority: i32,
}

impl TaskGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            weights: CategoryWeights::default(),
            min_priority: 1,
            max_priority: 10,
        }
    }

    /// Sets the category mix.
    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the inclusive priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::PriorityRange { min, max });
        }
        self.min_priority = min;
        self.max_priority = max;
        Ok(self)
    }

    /// Generates `count` tasks with ids `0..count` and durations drawn
    /// uniformly from `min_duration..=max_duration`.
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn generate(&mut self, count: usize, min_duration: u32, max_duration: u32) -> Vec<Task> {
        let (lo, hi) = if min_duration <= max_duration {
            (min_duration, max_duration)
        } else {
            (max_duration, min_duration)
        };

        (0..count)
            .map(|i| {
                let duration = self.rng.random_range(lo..=hi);
                let category = self.weights.pick(self.rng.random::<f64>());
                let priority = self.rng.random_range(self.min_priority..=self.max_priority);
                Task::new(i as TaskId, duration, category).with_priority(priority)
            })
            .collect()
    }
}
