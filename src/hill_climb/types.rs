//! Core trait for hill-climbing meta-optimization.

use crate::error::Result;

/// Defines an outer search over a structural feature value.
///
/// # Examples
///
/// ```ignore
/// struct MinimalCircuit { /* gates, truth table */ }
///
/// impl HillClimbProblem for MinimalCircuit {
///     type Candidate = EvolveResult<Node, usize>;
///
///     fn optimize(&self, max_nodes: usize) -> Result<Self::Candidate> {
///         EvolveRunner::get_best(&self.with_max_nodes(max_nodes), &self.config)
///     }
///
///     fn is_improvement(&self, best: &Self::Candidate, child: &Self::Candidate) -> bool {
///         child.best.fitness() == &self.rules && used_nodes(child) < used_nodes(best)
///     }
///
///     fn is_optimal(&self, c: &Self::Candidate) -> bool { used_nodes(c) == self.expected }
///
///     fn next_feature_value(&self, best: &Self::Candidate) -> usize { used_nodes(best) - 1 }
/// }
/// ```
pub trait HillClimbProblem {
    /// The outcome of one inner optimization.
    type Candidate;

    /// Runs the inner optimization at `feature_value`.
    fn optimize(&self, feature_value: usize) -> Result<Self::Candidate>;

    /// Whether `candidate` should replace `best`.
    fn is_improvement(&self, best: &Self::Candidate, candidate: &Self::Candidate) -> bool;

    /// Stops the climb once the best satisfies this.
    fn is_optimal(&self, candidate: &Self::Candidate) -> bool;

    /// The feature value to try next, derived from the current best.
    fn next_feature_value(&self, best: &Self::Candidate) -> usize;

    /// Called for each improving outer-level result.
    ///
    /// Inner runs should stay quiet; only accepted improvements are
    /// reported here.
    fn display(&self, _candidate: &Self::Candidate, _feature_value: usize) {}
}
