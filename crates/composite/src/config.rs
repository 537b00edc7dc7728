use thiserror::Error;

/// Timing of a composite run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    interval: f64,
    total_time: f64,
}

/// Errors that can occur when validating a run config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("interval must be finite and positive")]
    Interval,

    #[error("total_time must be finite and non-negative")]
    TotalTime,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            total_time: 1.0,
        }
    }
}

impl RunConfig {
    /// Creates a validated run config.
    ///
    /// # Errors
    ///
    /// Returns an error if `interval` is not positive or `total_time` is
    /// negative, or either is non-finite.
    pub fn new(interval: f64, total_time: f64) -> Result<Self, ConfigError> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::Interval);
        }
        if !total_time.is_finite() || total_time < 0.0 {
            return Err(ConfigError::TotalTime);
        }

        Ok(Self {
            interval,
            total_time,
        })
    }

    /// Returns the outer interval each update advances.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Returns the simulated time to run for.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_timing() {
        assert_eq!(RunConfig::new(0.0, 3.0), Err(ConfigError::Interval));
        assert_eq!(RunConfig::new(f64::NAN, 3.0), Err(ConfigError::Interval));
        assert_eq!(RunConfig::new(1.0, -1.0), Err(ConfigError::TotalTime));
        assert!(RunConfig::new(1.0, 0.0).is_ok());
    }
}
