#[cfg(test)]
mod filter_test;

use serde::{Deserialize, Serialize};

use crate::motion::AxisData;

/// Noise parameters for an [AxisFilter]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct FilterConfig {
    /// Added to the uncertainty on every predict step
    pub process_noise: f64,
    /// Expected variance of a single observation
    pub measurement_noise: f64,
    /// Uncertainty of the zero estimate the filter starts from
    pub initial_uncertainty: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.001,
            measurement_noise: 0.1,
            initial_uncertainty: 1.0,
        }
    }
}

impl FilterConfig {
    /// Check that the parameters keep the filter gain defined. The gain is
    /// `uncertainty / (uncertainty + measurement_noise)`, so the denominator
    /// must never reach zero.
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("process_noise", self.process_noise),
            ("measurement_noise", self.measurement_noise),
            ("initial_uncertainty", self.initial_uncertainty),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        if self.measurement_noise == 0.0 && self.initial_uncertainty == 0.0 {
            return Err("measurement_noise and initial_uncertainty cannot both be zero".into());
        }
        if self.measurement_noise == 0.0 && self.process_noise == 0.0 {
            // The uncertainty collapses to zero after the first step
            return Err("measurement_noise and process_noise cannot both be zero".into());
        }
        Ok(())
    }
}

/// Single variable recursive estimator. This is a scalar simplification of a
/// Kalman filter: one state, one uncertainty, no covariance matrix.
#[derive(Debug, Clone)]
pub struct AxisFilter {
    estimate: f64,
    uncertainty: f64,
    process_noise: f64,
    measurement_noise: f64,
    gain: f64,
}

impl AxisFilter {
    /// Create a new filter starting from a zero estimate.
    ///
    /// Precondition: `uncertainty + measurement_noise` must never be zero,
    /// otherwise the gain is undefined. Use `measurement_noise > 0`, or check
    /// the parameters with [FilterConfig::validate]. [AxisFilter::step] does
    /// not check this at runtime.
    pub fn new(config: FilterConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid filter config");
        Self {
            estimate: 0.0,
            uncertainty: config.initial_uncertainty,
            process_noise: config.process_noise,
            measurement_noise: config.measurement_noise,
            gain: 0.0,
        }
    }

    /// Advance the filter by one observation and return the updated estimate
    pub fn step(&mut self, observation: f64) -> f64 {
        // Update
        self.gain = self.uncertainty / (self.uncertainty + self.measurement_noise);
        let updated_estimate = self.estimate + self.gain * (observation - self.estimate);
        let updated_uncertainty = (1.0 - self.gain) * self.uncertainty;

        // Predict
        self.estimate = updated_estimate;
        self.uncertainty = updated_uncertainty + self.process_noise;

        updated_estimate
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Uncertainty carried into the next step, after the predict step
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Gain used by the most recent step
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

/// Three independent [AxisFilter] instances, one per axis
#[derive(Debug, Clone)]
pub struct FilterBank {
    axes: [AxisFilter; 3],
}

impl FilterBank {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            axes: [
                AxisFilter::new(config),
                AxisFilter::new(config),
                AxisFilter::new(config),
            ],
        }
    }

    /// Filter each axis of the raw sample on its own
    pub fn filter(&mut self, raw: AxisData) -> AxisData {
        let raw = raw.to_array();
        let mut smoothed = [0.0; 3];
        for (i, filter) in self.axes.iter_mut().enumerate() {
            smoothed[i] = filter.step(raw[i]);
        }
        AxisData::from(smoothed)
    }

    /// Returns the filter for the given axis index (0, 1 or 2)
    pub fn axis(&self, index: usize) -> Option<&AxisFilter> {
        self.axes.get(index)
    }
}
