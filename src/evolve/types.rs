//! Core types for the improvement engine.
//!
//! [`Chromosome`] is the unit of search and [`GeneticProblem`] is the
//! contract between the generic engine and a puzzle domain.

use std::fmt::Debug;
use std::time::Duration;

use rand::Rng;

use super::operators::mutate_genes;

/// The operator that produced a chromosome.
///
/// The tag drives adaptive strategy weighting: every time a chromosome
/// becomes the new global best its strategy is recorded, making that
/// operator more likely to be drawn again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Built from scratch by the candidate generator.
    Create,
    /// Derived from a single parent.
    Mutate,
    /// Recombined from a parent and a donor.
    Crossover,
    /// Built outside the engine.
    None,
}

/// A candidate solution.
///
/// Genes and fitness are fixed at construction; only `age` changes while
/// the chromosome sits in the parent pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<G, F> {
    genes: Vec<G>,
    fitness: F,

    /// Provenance of this chromosome.
    pub strategy: Strategy,

    /// Generations survived without producing a better child.
    pub age: usize,
}

impl<G, F> Chromosome<G, F> {
    /// Creates a chromosome with age 0.
    ///
    /// `fitness` must have been computed from `genes` by the problem's
    /// evaluator.
    pub fn new(genes: Vec<G>, fitness: F, strategy: Strategy) -> Self {
        Self {
            genes,
            fitness,
            strategy,
            age: 0,
        }
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

/// An event pulled from the improvement stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Improvement<G, F> {
    /// A chromosome strictly better than every one emitted before it.
    Better(Chromosome<G, F>),

    /// The time limit elapsed; carries the most recent best.
    TimedOut(Chromosome<G, F>),
}

impl<G, F> Improvement<G, F> {
    pub fn chromosome(&self) -> &Chromosome<G, F> {
        match self {
            Improvement::Better(c) | Improvement::TimedOut(c) => c,
        }
    }

    pub fn into_chromosome(self) -> Chromosome<G, F> {
        match self {
            Improvement::Better(c) | Improvement::TimedOut(c) => c,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Improvement::TimedOut(_))
    }
}

/// Defines a search problem for [`EvolveRunner`](super::EvolveRunner).
///
/// The required methods describe the gene domain, the fitness evaluator and
/// the optimum. Everything else has a default:
///
/// - [`create`](Self::create): `None`, so genes are sampled from the gene set
/// - [`mutate`](Self::mutate): single-gene resampling from the gene set
/// - [`crossover`](Self::crossover): disabled unless
///   [`uses_crossover`](Self::uses_crossover) returns `true`
/// - [`display`](Self::display): no-op
///
/// # Fitness
///
/// Higher is better. `Fitness` only needs a total order, so multi-part
/// scores are usually a small struct with a hand-written `Ord`.
///
/// # Examples
///
/// ```
/// use u_evolve::evolve::GeneticProblem;
///
/// struct Password {
///     target: Vec<u8>,
///     gene_set: Vec<u8>,
/// }
///
/// impl GeneticProblem for Password {
///     type Gene = u8;
///     type Fitness = usize;
///
///     fn gene_set(&self) -> &[u8] {
///         &self.gene_set
///     }
///
///     fn fitness(&self, genes: &[u8]) -> usize {
///         genes.iter().zip(&self.target).filter(|(a, b)| a == b).count()
///     }
///
///     fn optimal_fitness(&self) -> usize {
///         self.target.len()
///     }
/// }
/// ```
pub trait GeneticProblem {
    /// A single gene.
    type Gene: Clone + PartialEq;

    /// The fitness type. Compared with `Ord`; higher is better.
    type Fitness: Ord + Clone + Debug;

    /// Legal gene values for sampling and default mutation.
    ///
    /// May be empty when [`create`](Self::create) and
    /// [`mutate`](Self::mutate) are both overridden.
    fn gene_set(&self) -> &[Self::Gene];

    /// Evaluates a gene sequence. Must be deterministic.
    fn fitness(&self, genes: &[Self::Gene]) -> Self::Fitness;

    /// The run stops as soon as an improvement reaches this value.
    fn optimal_fitness(&self) -> Self::Fitness;

    /// Builds a complete gene sequence, bypassing gene-set sampling.
    ///
    /// Used for structured or variable-length genomes.
    fn create<R: Rng>(&self, _rng: &mut R) -> Option<Vec<Self::Gene>> {
        None
    }

    /// Edits a copy of the parent's genes in place.
    fn mutate<R: Rng>(&self, genes: &mut Vec<Self::Gene>, rng: &mut R) {
        mutate_genes(genes, self.gene_set(), rng);
    }

    /// Whether [`crossover`](Self::crossover) takes part in child production.
    fn uses_crossover(&self) -> bool {
        false
    }

    /// Combines a parent with a donor.
    ///
    /// Returns `None` when the two are indistinguishable and no meaningful
    /// combination exists; the engine then replaces the donor with a fresh
    /// candidate and mutates the parent instead.
    fn crossover<R: Rng>(
        &self,
        _parent: &[Self::Gene],
        _donor: &[Self::Gene],
        _rng: &mut R,
    ) -> Option<Vec<Self::Gene>> {
        None
    }

    /// Called for every improvement and for the final timeout result.
    fn display(&self, _candidate: &Chromosome<Self::Gene, Self::Fitness>, _elapsed: Duration) {}
}

/// Shorthand for the chromosome type of a problem.
pub type ChromosomeOf<P> = Chromosome<<P as GeneticProblem>::Gene, <P as GeneticProblem>::Fitness>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chromosome_starts_young() {
        let c = Chromosome::new(vec![1, 2, 3], 7u32, Strategy::Create);
        assert_eq!(c.genes(), &[1, 2, 3]);
        assert_eq!(*c.fitness(), 7);
        assert_eq!(c.age, 0);
        assert_eq!(c.strategy, Strategy::Create);
    }

    #[test]
    fn test_improvement_accessors() {
        let better = Improvement::Better(Chromosome::new(vec!['a'], 1, Strategy::Mutate));
        let timed_out = Improvement::TimedOut(Chromosome::new(vec!['b'], 2, Strategy::None));

        assert!(!better.is_timeout());
        assert!(timed_out.is_timeout());
        assert_eq!(better.chromosome().genes(), &['a']);
        assert_eq!(timed_out.into_chromosome().into_genes(), vec!['b']);
    }
}
