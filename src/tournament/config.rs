//! Tournament configuration.

use crate::error::ConfigError;

/// Configuration for [`TournamentRunner`](super::TournamentRunner).
///
/// The population always holds `num_parents² + 1` members: every ordered
/// pair of distinct parents breeds one child, the parents survive, and one
/// fresh member is generated.
///
/// # Examples
///
/// ```
/// use u_evolve::tournament::TournamentConfig;
///
/// let config = TournamentConfig::default()
///     .with_num_parents(5)
///     .with_max_generations(20)
///     .with_seed(42);
/// assert_eq!(config.population_size(), 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentConfig {
    /// Top-ranked members kept as parents each generation.
    pub num_parents: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Whether to play each generation's games in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are identical
    /// to the sequential path.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_parents: 10,
            max_generations: 100,
            parallel: true,
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn with_num_parents(mut self, n: usize) -> Self {
        self.num_parents = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `num_parents² + 1`, saturating at `usize::MAX`.
    ///
    /// [`validate`](Self::validate) rejects configurations where it would
    /// overflow.
    pub fn population_size(&self) -> usize {
        self.checked_population_size().unwrap_or(usize::MAX)
    }

    fn checked_population_size(&self) -> Option<usize> {
        self.num_parents
            .checked_mul(self.num_parents)?
            .checked_add(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_parents == 0 {
            return Err(ConfigError::ZeroParents);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.checked_population_size().is_none() {
            return Err(ConfigError::PopulationOverflow(self.num_parents));
        }
        Ok(())
    }
}
