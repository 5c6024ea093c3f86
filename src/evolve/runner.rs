//! The caller-facing driver for the improvement stream.
//!
//! [`EvolveRunner`] pulls improvements, shows each one through
//! [`GeneticProblem::display`], and stops at the first one that reaches
//! [`GeneticProblem::optimal_fitness`].

use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::EvolveConfig;
use super::strategy::StrategyUsage;
use super::stream::ImprovementStream;
use super::types::{Chromosome, GeneticProblem};
use crate::error::{EvolveError, Result};

/// Result of an improvement run.
#[derive(Debug, Clone)]
pub struct EvolveResult<G, F> {
    /// The best chromosome found.
    pub best: Chromosome<G, F>,

    /// Whether the run ended on the time limit instead of the optimum.
    ///
    /// A timed-out result is still a valid, degraded answer.
    pub timed_out: bool,

    /// Number of improvements emitted, including the first parent.
    pub improvements: usize,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Fitness of every emitted improvement, in order.
    pub fitness_history: Vec<F>,

    /// How often each strategy appears in the adaptive weighting.
    pub strategy_usage: StrategyUsage,
}

/// Executes the improvement loop.
///
/// # Usage
///
/// ```
/// use u_evolve::evolve::{EvolveConfig, EvolveRunner, GeneticProblem};
///
/// struct Target(Vec<u8>);
///
/// impl GeneticProblem for Target {
///     type Gene = u8;
///     type Fitness = usize;
///     fn gene_set(&self) -> &[u8] { b"abcdefghijklmnopqrstuvwxyz" }
///     fn fitness(&self, genes: &[u8]) -> usize {
///         genes.iter().zip(&self.0).filter(|(a, b)| a == b).count()
///     }
///     fn optimal_fitness(&self) -> usize { self.0.len() }
/// }
///
/// let problem = Target(b"rust".to_vec());
/// let config = EvolveConfig::new(4).with_seed(42);
/// let result = EvolveRunner::get_best(&problem, &config).unwrap();
/// assert_eq!(result.best.genes(), b"rust");
/// ```
pub struct EvolveRunner;

impl EvolveRunner {
    /// Runs until the optimal fitness is reached or the time limit elapses.
    ///
    /// Uses `config.seed` when set, otherwise a random seed.
    pub fn get_best<P: GeneticProblem>(
        problem: &P,
        config: &EvolveConfig,
    ) -> Result<EvolveResult<P::Gene, P::Fitness>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::get_best_with_rng(problem, config, rng)
    }

    /// Runs with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::InvalidConfig`] for an invalid configuration
    /// - [`EvolveError::EmptyGeneSet`] when candidates cannot be generated
    /// - [`EvolveError::SearchExhausted`] if the stream ends without
    ///   reaching the optimum or timing out
    pub fn get_best_with_rng<P: GeneticProblem, R: Rng>(
        problem: &P,
        config: &EvolveConfig,
        rng: R,
    ) -> Result<EvolveResult<P::Gene, P::Fitness>> {
        let optimal = problem.optimal_fitness();
        let mut stream = ImprovementStream::new(problem, config, rng)?;
        let mut fitness_history = Vec::new();

        loop {
            let Some(event) = stream.next() else {
                return Err(EvolveError::SearchExhausted);
            };
            let event = event?;
            problem.display(event.chromosome(), stream.elapsed());

            let timed_out = event.is_timeout();
            let candidate = event.into_chromosome();
            if !timed_out {
                fitness_history.push(candidate.fitness().clone());
                if *candidate.fitness() < optimal {
                    continue;
                }
                info!(
                    "reached optimal fitness {:?} after {} improvements",
                    candidate.fitness(),
                    fitness_history.len()
                );
            }

            return Ok(EvolveResult {
                best: candidate,
                timed_out,
                improvements: fitness_history.len(),
                elapsed: stream.elapsed(),
                fitness_history,
                strategy_usage: stream.dispatcher().usage(),
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
