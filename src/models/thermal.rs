//! Lumped-capacitance thermal model.
//!
//! # Update Rule
//!
//! ```text
//! T ← T + k_heat · P − k_cool · (T − T_ambient)
//! T ← max(T, T_ambient)
//! T_peak ← max(T_peak, T)
//! ```
//!
//! One update per simulation tick.

use serde::{Deserialize, Serialize};

/// Default throttle threshold (°C).
pub const DEFAULT_THROTTLE_CELSIUS: f64 = 85.0;

/// Thermal constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalParams {
    /// Ambient (floor) temperature (°C).
    pub ambient_celsius: f64,
    /// Temperature rise per watt per tick.
    pub heating_coeff: f64,
    /// Fraction of the excess over ambient shed per tick.
    pub cooling_coeff: f64,
}

impl ThermalParams {
    pub fn new(ambient_celsius: f64, heating_coeff: f64, cooling_coeff: f64) -> Self {
        Self {
            ambient_celsius,
            heating_coeff,
            cooling_coeff,
        }
    }
}

impl Default for ThermalParams {
    fn default() -> Self {
        Self::new(25.0, 0.1, 0.05)
    }
}

/// Stateful temperature tracker driven by instantaneous power.
///
/// # Example
/// ```
/// use u_powersim::models::ThermalModel;
///
/// let mut thermal = ThermalModel::new();
/// thermal.update(10.0);
/// assert!((thermal.current_temp() - 26.0).abs() < 1e-12);
/// assert!(!thermal.should_throttle(85.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalModel {
    params: ThermalParams,
    current_temp: f64,
    peak_temp: f64,
}

impl ThermalModel {
    /// Creates a model with default parameters (25 °C, 0.1, 0.05).
    pub fn new() -> Self {
        Self::with_params(ThermalParams::default())
    }

    /// Creates a model at ambient temperature.
    pub fn with_params(params: ThermalParams) -> Self {
        Self {
            params,
            current_temp: params.ambient_celsius,
            peak_temp: params.ambient_celsius,
        }
    }

    pub fn params(&self) -> &ThermalParams {
        &self.params
    }

    /// Replaces the constants. Temperatures are kept as they are.
    pub fn set_params(&mut self, params: ThermalParams) {
        self.params = params;
    }

    pub fn current_temp(&self) -> f64 {
        self.current_temp
    }

    /// Highest temperature seen since construction or the last reset.
    pub fn peak_temp(&self) -> f64 {
        self.peak_temp
    }

    /// Advances one tick under `power_watts`.
    pub fn update(&mut self, power_watts: f64) {
        let p = &self.params;
        let heating = p.heating_coeff * power_watts;
        let cooling = p.cooling_coeff * (self.current_temp - p.ambient_celsius);

        self.current_temp = (self.current_temp + heating - cooling).max(p.ambient_celsius);
        self.peak_temp = self.peak_temp.max(self.current_temp);
    }

    /// Whether the current temperature is above `threshold_celsius`.
    ///
    /// Advisory only: the driver does not act on it.
    pub fn should_throttle(&self, threshold_celsius: f64) -> bool {
        self.current_temp > threshold_celsius
    }

    /// Returns both temperatures to ambient.
    pub fn reset(&mut self) {
        self.current_temp = self.params.ambient_celsius;
        self.peak_temp = self.params.ambient_celsius;
    }
}

impl Default for ThermalModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temperature_update() {
        let mut model = ThermalModel::with_params(ThermalParams::new(25.0, 0.1, 0.05));
        assert_eq!(model.current_temp(), 25.0);
        assert_eq!(model.peak_temp(), 25.0);

        model.update(10.0);
        assert!(model.current_temp() > 25.0);
        assert!(model.peak_temp() > 25.0);
    }

    #[test]
    fn test_throttling() {
        let mut model = ThermalModel::with_params(ThermalParams::new(25.0, 0.5, 0.01));
        for _ in 0..100 {
            model.update(20.0);
        }
        assert!(model.should_throttle(DEFAULT_THROTTLE_CELSIUS));
    }

    #[test]
    fn test_reset() {
        let mut model = ThermalModel::new();
        model.update(10.0);
        assert!(model.current_temp() > 25.0);

        model.reset();
        assert_eq!(model.current_temp(), 25.0);
        assert_eq!(model.peak_temp(), 25.0);
    }

    #[test]
    fn test_set_params_keeps_temperature() {
        let mut model = ThermalModel::new();
        model.update(10.0);
        assert!((model.current_temp() - 26.0).abs() < 1e-12);

        model.set_params(ThermalParams::new(25.0, 0.0, 0.5));
        assert!((model.current_temp() - 26.0).abs() < 1e-12);
        model.update(100.0);
        assert!((model.current_temp() - 25.5).abs() < 1e-12);
        assert!((model.peak_temp() - 26.0).abs() < 1e-12);
    }

    #[test]
    fn test_peak_survives_cooling() {
        let mut model = ThermalModel::new();
        model.update(50.0);
        let peak = model.peak_temp();
        for _ in 0..10 {
            model.update(0.0);
        }
        assert!(model.current_temp() < peak);
        assert_eq!(model.peak_temp(), peak);
    }

    #[test]
    fn test_steady_state() {
        // Equilibrium: k_heat · P = k_cool · (T − T_amb) → T = 25 + 0.1·5/0.05 = 35
        let mut model = ThermalModel::new();
        for _ in 0..2_000 {
            model.update(5.0);
        }
        assert!((model.current_temp() - 35.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn never_below_ambient(powers in proptest::collection::vec(-5.0f64..50.0, 0..100)) {
            let mut model = ThermalModel::new();
            for p in powers {
                model.update(p);
                prop_assert!(model.current_temp() >= 25.0);
            }
        }

        #[test]
        fn zero_power_cools_monotonically(warmup in 0.0f64..100.0, steps in 1usize..200) {
            let mut model = ThermalModel::new();
            model.update(warmup);
            let mut last = model.current_temp();
            for _ in 0..steps {
                model.update(0.0);
                prop_assert!(model.current_temp() <= last);
                last = model.current_temp();
            }
        }
    }
}
