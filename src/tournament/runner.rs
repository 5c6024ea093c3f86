//! Tournament execution loop.
//!
//! # Algorithm
//!
//! 1. Generate `num_parents² + 1` members with empty records.
//! 2. Each generation:
//!    a. Every ordered pair of distinct members plays one game; both
//!       records are updated.
//!    b. Rank members by `sort_key`, highest first. The top member becomes
//!       the new best if its key beats the best so far.
//!    c. Breed one child per ordered pair of distinct top-`num_parents`
//!       members, keep those parents with cleared records, and add one
//!       freshly generated member.

use std::cmp::Ordering;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::TournamentConfig;
use super::types::{CompetitionResult, Record, TournamentProblem};
use crate::error::{EvolveError, Result};

/// Bookkeeping for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub generation: usize,

    /// Members that competed.
    pub population_size: usize,

    /// Games played, one per ordered pair of distinct members.
    pub games_played: usize,

    /// Sum of all members' record totals. Each game is recorded twice.
    pub outcomes_recorded: usize,
}

/// Result of a tournament run.
#[derive(Debug, Clone)]
pub struct TournamentResult<G> {
    /// The best member found.
    pub best: G,

    /// Its record in the generation where it became best.
    pub best_record: Record,

    /// The generation in which it became best.
    pub best_generation: usize,

    /// Number of times the best was replaced.
    pub improvements: usize,

    /// One entry per generation.
    pub generation_stats: Vec<GenerationStats>,
}

#[derive(Clone)]
struct Entrant<G> {
    genes: G,
    record: Record,
}

impl<G> Entrant<G> {
    fn new(genes: G) -> Self {
        Self {
            genes,
            record: Record::default(),
        }
    }
}

/// Executes the tournament.
pub struct TournamentRunner;

impl TournamentRunner {
    /// Runs the tournament for `max_generations` generations.
    pub fn run<P: TournamentProblem>(
        problem: &P,
        config: &TournamentConfig,
    ) -> Result<TournamentResult<P::Genes>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, rng)
    }

    /// Runs the tournament with a caller-supplied random source.
    pub fn run_with_rng<P: TournamentProblem, R: Rng>(
        problem: &P,
        config: &TournamentConfig,
        mut rng: R,
    ) -> Result<TournamentResult<P::Genes>> {
        config.validate()?;

        let mut population: Vec<Entrant<P::Genes>> = (0..config.population_size())
            .map(|_| Entrant::new(problem.generate(&mut rng)))
            .collect();

        let mut best: Option<(Entrant<P::Genes>, P::Key, usize)> = None;
        let mut improvements = 0usize;
        let mut generation_stats = Vec::with_capacity(config.max_generations);

        for generation in 1..=config.max_generations {
            let games_played = play_round(problem, &mut population, config.parallel);
            generation_stats.push(GenerationStats {
                generation,
                population_size: population.len(),
                games_played,
                outcomes_recorded: population.iter().map(|e| e.record.total()).sum(),
            });

            // Rank by key, highest first. The sort is stable, so ties keep
            // their population order.
            let mut ranked: Vec<(P::Key, Entrant<P::Genes>)> = population
                .into_iter()
                .map(|e| (problem.sort_key(&e.genes, &e.record), e))
                .collect();
            ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

            let (top_key, top) = &ranked[0];
            let improves = best
                .as_ref()
                .is_none_or(|(_, best_key, _)| top_key > best_key);
            if improves {
                debug!(
                    "generation {generation}: new best with record {:?}",
                    top.record
                );
                problem.display(&top.genes, &top.record, generation);
                best = Some((top.clone(), problem.sort_key(&top.genes, &top.record), generation));
                improvements += 1;
            }

            population = next_generation(problem, &ranked, config.num_parents, &mut rng);
        }

        info!(
            "tournament finished after {} generations, {improvements} improvements",
            config.max_generations
        );

        // The first generation always sets a best.
        let (best, _, best_generation) = best.ok_or(EvolveError::SearchExhausted)?;

        Ok(TournamentResult {
            best: best.genes,
            best_record: best.record,
            best_generation,
            improvements,
            generation_stats,
        })
    }
}

/// Plays every ordered pair of distinct members once, returning the number
/// of games.
fn play_round<P: TournamentProblem>(
    problem: &P,
    population: &mut [Entrant<P::Genes>],
    parallel: bool,
) -> usize {
    let n = population.len();
    let results = play_all(problem, population, parallel);
    for (i, j, result) in &results {
        population[*i].record.add(*result);
        population[*j].record.add(result.mirror());
    }
    debug_assert_eq!(results.len(), n * n.saturating_sub(1));
    results.len()
}

#[cfg(feature = "parallel")]
fn play_all<P: TournamentProblem>(
    problem: &P,
    population: &[Entrant<P::Genes>],
    parallel: bool,
) -> Vec<(usize, usize, CompetitionResult)> {
    if !parallel {
        return play_all_sequential(problem, population);
    }
    let n = population.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            (0..n)
                .filter(move |&j| j != i)
                .map(move |j| (i, j, problem.compete(&population[i].genes, &population[j].genes)))
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn play_all<P: TournamentProblem>(
    problem: &P,
    population: &[Entrant<P::Genes>],
    _parallel: bool,
) -> Vec<(usize, usize, CompetitionResult)> {
    play_all_sequential(problem, population)
}

fn play_all_sequential<P: TournamentProblem>(
    problem: &P,
    population: &[Entrant<P::Genes>],
) -> Vec<(usize, usize, CompetitionResult)> {
    let n = population.len();
    let mut results = Vec::with_capacity(n * n.saturating_sub(1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                results.push((i, j, problem.compete(&population[i].genes, &population[j].genes)));
            }
        }
    }
    results
}

fn next_generation<P: TournamentProblem, R: Rng>(
    problem: &P,
    ranked: &[(P::Key, Entrant<P::Genes>)],
    num_parents: usize,
    rng: &mut R,
) -> Vec<Entrant<P::Genes>> {
    let parents: Vec<&P::Genes> = ranked
        .iter()
        .take(num_parents)
        .map(|(_, e)| &e.genes)
        .collect();

    let mut next = Vec::with_capacity(num_parents * num_parents + 1);
    for (i, a) in parents.iter().enumerate() {
        for (j, b) in parents.iter().enumerate() {
            if i != j {
                next.push(Entrant::new(problem.crossover(a, b, rng)));
            }
        }
    }
    next.extend(parents.iter().map(|&genes| Entrant::new(genes.clone())));
    next.push(Entrant::new(problem.generate(rng)));
    next
}
