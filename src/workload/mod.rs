//! Synthetic workload generation.
//!
//! Produces reproducible task lists from an explicitly seeded generator.
//! There is no process-wide random state: two generators built from the
//! same seed and settings emit the same tasks.

mod generator;

pub use generator::{CategoryWeights, TaskGenerator};
