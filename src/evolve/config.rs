//! Improvement engine configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for [`EvolveRunner`](super::EvolveRunner).
///
/// # Defaults
///
/// ```
/// use u_evolve::evolve::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.pool_size, 1);
/// assert!(config.max_age.is_none());
/// assert!(config.time_limit.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::evolve::EvolveConfig;
///
/// let config = EvolveConfig::new(8)
///     .with_pool_size(10)
///     .with_max_age(50)
///     .with_max_seconds(2.5)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolveConfig {
    /// Number of genes sampled per candidate when the problem has no
    /// custom creator.
    pub target_length: usize,

    /// Number of parents searched in round-robin order.
    pub pool_size: usize,

    /// Failed children a parent tolerates before the annealing rule
    /// decides between a worse child and the global best.
    ///
    /// `None` disables aging: worse children are always discarded.
    pub max_age: Option<usize>,

    /// Optional wall-clock budget for the whole run.
    ///
    /// Checked before each new candidate, so the run may overshoot by one
    /// fitness evaluation.
    pub time_limit: Option<Duration>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            target_length: 0,
            pool_size: 1,
            max_age: None,
            time_limit: None,
            seed: None,
        }
    }
}

impl EvolveConfig {
    /// Creates a configuration sampling `target_length` genes per candidate.
    pub fn new(target_length: usize) -> Self {
        Self {
            target_length,
            ..Self::default()
        }
    }

    pub fn with_target_length(mut self, n: usize) -> Self {
        self.target_length = n;
        self
    }

    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    pub fn with_max_age(mut self, age: usize) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Sets the time limit in (fractional) seconds.
    ///
    /// Negative or NaN values are treated as zero and rejected by
    /// [`validate`](Self::validate). Values too large for a [`Duration`]
    /// saturate to [`Duration::MAX`].
    pub fn with_max_seconds(mut self, seconds: f64) -> Self {
        let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        self.time_limit = Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX));
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit = Some(Duration::from_millis(ms));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::PoolSizeZero);
        }
        if self.time_limit.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
