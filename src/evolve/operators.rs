//! Candidate generation, mutation and crossover.
//!
//! The public functions work on raw gene slices and can be reused inside
//! custom [`GeneticProblem`] operators. The crate-private ones wrap them
//! into evaluated [`Chromosome`]s.

use log::trace;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::types::{Chromosome, ChromosomeOf, GeneticProblem, Strategy};
use crate::error::{ConfigError, EvolveError, Result};

/// Samples `length` genes from `gene_set` in shuffled blocks.
///
/// Each block is a fresh shuffle of the whole gene set, truncated to the
/// number of genes still missing. Genes therefore repeat only once every
/// value has been used in the current block.
///
/// Returns an empty vector when `gene_set` is empty.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_evolve::evolve::operators::sample_genes;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let genes = sample_genes(&[0u8, 1, 2, 3], 6, &mut rng);
/// assert_eq!(genes.len(), 6);
/// // The first block holds each value exactly once.
/// let mut head = genes[..4].to_vec();
/// head.sort();
/// assert_eq!(head, vec![0, 1, 2, 3]);
/// ```
pub fn sample_genes<G: Clone, R: Rng>(gene_set: &[G], length: usize, rng: &mut R) -> Vec<G> {
    if gene_set.is_empty() {
        return Vec::new();
    }
    let mut genes = Vec::with_capacity(length);
    let mut block = gene_set.to_vec();
    while genes.len() < length {
        let take = (length - genes.len()).min(gene_set.len());
        block.shuffle(rng);
        genes.extend(block.iter().take(take).cloned());
    }
    genes
}

/// Replaces one random gene with a different value from `gene_set`.
///
/// Two distinct entries of the gene set are drawn; the second is used when
/// the first equals the current value. The result always differs from the
/// input as long as the gene set holds at least two distinct values.
///
/// Does nothing when either slice is empty.
pub fn mutate_genes<G: Clone + PartialEq, R: Rng>(genes: &mut [G], gene_set: &[G], rng: &mut R) {
    if genes.is_empty() || gene_set.is_empty() {
        return;
    }
    let i = rng.random_range(0..genes.len());
    if gene_set.len() == 1 {
        genes[i] = gene_set[0].clone();
        return;
    }
    let picks = index::sample(rng, gene_set.len(), 2);
    let new_gene = &gene_set[picks.index(0)];
    let alternate = &gene_set[picks.index(1)];
    genes[i] = if *new_gene == genes[i] {
        alternate.clone()
    } else {
        new_gene.clone()
    };
}

/// Builds and evaluates a new candidate.
///
/// Uses the problem's creator when it has one, otherwise samples
/// `length` genes from the gene set.
pub(crate) fn generate_parent<P: GeneticProblem, R: Rng>(
    problem: &P,
    length: usize,
    rng: &mut R,
) -> Result<ChromosomeOf<P>> {
    let genes = match problem.create(rng) {
        Some(genes) => genes,
        None => {
            if problem.gene_set().is_empty() {
                return Err(EvolveError::EmptyGeneSet);
            }
            if length == 0 {
                return Err(ConfigError::ZeroTargetLength.into());
            }
            sample_genes(problem.gene_set(), length, rng)
        }
    };
    let fitness = problem.fitness(&genes);
    Ok(Chromosome::new(genes, fitness, Strategy::Create))
}

/// Mutates a copy of `parent` with the problem's mutation operator.
pub(crate) fn mutate<P: GeneticProblem, R: Rng>(
    problem: &P,
    parent: &ChromosomeOf<P>,
    rng: &mut R,
) -> ChromosomeOf<P> {
    let mut genes = parent.genes().to_vec();
    problem.mutate(&mut genes, rng);
    let fitness = problem.fitness(&genes);
    Chromosome::new(genes, fitness, Strategy::Mutate)
}

/// Recombines the parent at `parent_index` with a donor from the pool.
///
/// When the problem reports the pair as indistinguishable, the donor's
/// slot is refilled with a fresh candidate and the parent is mutated
/// instead. The pool length never changes.
pub(crate) fn crossover<P: GeneticProblem, R: Rng>(
    problem: &P,
    parent_index: usize,
    pool: &mut [ChromosomeOf<P>],
    length: usize,
    rng: &mut R,
) -> Result<ChromosomeOf<P>> {
    let mut donor_index = rng.random_range(0..pool.len());
    if donor_index == parent_index {
        donor_index = (donor_index + 1) % pool.len();
    }

    let child = problem.crossover(pool[parent_index].genes(), pool[donor_index].genes(), rng);
    match child {
        Some(genes) => {
            let fitness = problem.fitness(&genes);
            Ok(Chromosome::new(genes, fitness, Strategy::Crossover))
        }
        None => {
            trace!("donor {donor_index} exhausted, replacing it with a new candidate");
            // With a single slot the donor is the parent, so keep a copy.
            let parent = pool[parent_index].clone();
            pool[donor_index] = generate_parent(problem, length, rng)?;
            Ok(mutate(problem, &parent, rng))
        }
    }
}
