//! Hill-climbing execution loop.

use log::debug;

use super::config::HillClimbConfig;
use super::types::HillClimbProblem;
use crate::error::Result;

/// Result of a hill-climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbResult<C> {
    /// The best candidate accepted.
    pub best: C,

    /// Inner optimizations run after the initial one.
    pub rounds: usize,

    /// Number of times the best was replaced.
    pub improvements: usize,

    /// Whether the best satisfies [`HillClimbProblem::is_optimal`].
    pub reached_optimal: bool,

    /// The feature value of every accepted best, starting with the initial
    /// one.
    pub feature_history: Vec<usize>,
}

/// Executes the hill-climbing meta-optimizer.
///
/// # Examples
///
/// ```
/// use u_evolve::error::Result;
/// use u_evolve::hill_climb::{HillClimbConfig, HillClimbProblem, HillClimbRunner};
///
/// // The inner "optimizer" can always use at least 4 units.
/// struct Shrink;
///
/// impl HillClimbProblem for Shrink {
///     type Candidate = usize;
///     fn optimize(&self, limit: usize) -> Result<usize> { Ok(limit.max(4)) }
///     fn is_improvement(&self, best: &usize, c: &usize) -> bool { c < best }
///     fn is_optimal(&self, c: &usize) -> bool { *c == 4 }
///     fn next_feature_value(&self, best: &usize) -> usize { best - 1 }
/// }
///
/// let result = HillClimbRunner::run(&Shrink, &HillClimbConfig::new(9)).unwrap();
/// assert_eq!(result.best, 4);
/// assert!(result.reached_optimal);
/// ```
pub struct HillClimbRunner;

impl HillClimbRunner {
    /// Climbs until the best is optimal or `max_rounds` is exhausted.
    ///
    /// Errors from the inner optimization are returned immediately.
    pub fn run<P: HillClimbProblem>(
        problem: &P,
        config: &HillClimbConfig,
    ) -> Result<HillClimbResult<P::Candidate>> {
        let mut best = problem.optimize(config.initial_feature_value)?;
        let mut feature_history = vec![config.initial_feature_value];
        let mut rounds = 0usize;

        while !problem.is_optimal(&best) {
            if config.max_rounds.is_some_and(|max| rounds >= max) {
                break;
            }
            let feature_value = problem.next_feature_value(&best);
            let candidate = problem.optimize(feature_value)?;
            rounds += 1;

            if problem.is_improvement(&best, &candidate) {
                debug!("hill climb round {rounds}: improvement at feature value {feature_value}");
                best = candidate;
                feature_history.push(feature_value);
                problem.display(&best, feature_value);
            }
        }

        Ok(HillClimbResult {
            reached_optimal: problem.is_optimal(&best),
            improvements: feature_history.len() - 1,
            best,
            rounds,
            feature_history,
        })
    }
}
