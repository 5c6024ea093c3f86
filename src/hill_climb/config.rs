//! Hill-climbing configuration.

/// Configuration for [`HillClimbRunner`](super::HillClimbRunner).
///
/// # Examples
///
/// ```
/// use u_evolve::hill_climb::HillClimbConfig;
///
/// let config = HillClimbConfig::new(12).with_max_rounds(50);
/// assert_eq!(config.initial_feature_value, 12);
/// assert_eq!(config.max_rounds, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimbConfig {
    /// Feature value for the first inner optimization.
    pub initial_feature_value: usize,

    /// Maximum number of inner optimizations after the first.
    ///
    /// `None` climbs until the best is optimal.
    pub max_rounds: Option<usize>,
}

impl HillClimbConfig {
    pub fn new(initial_feature_value: usize) -> Self {
        Self {
            initial_feature_value,
            max_rounds: None,
        }
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }
}
