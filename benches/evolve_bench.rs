//! Criterion benchmarks for u-evolve search engines.
//!
//! Uses synthetic problems (password matching, OneMax, a numbers
//! tournament) to measure engine overhead independent of any domain.

use std::cmp::Ordering;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_evolve::evolve::{EvolveConfig, EvolveRunner, GeneticProblem};
use u_evolve::tournament::{CompetitionResult, Record, TournamentConfig, TournamentProblem, TournamentRunner};

// ===========================================================================
// Password: count positionally correct characters
// ===========================================================================

struct Password {
    target: Vec<u8>,
    gene_set: Vec<u8>,
}

impl Password {
    fn new(len: usize) -> Self {
        let gene_set: Vec<u8> = (b'a'..=b'z').chain(b'A'..=b'Z').collect();
        let target = (0..len).map(|i| gene_set[(i * 7) % gene_set.len()]).collect();
        Self { target, gene_set }
    }
}

impl GeneticProblem for Password {
    type Gene = u8;
    type Fitness = usize;

    fn gene_set(&self) -> &[u8] {
        &self.gene_set
    }

    fn fitness(&self, genes: &[u8]) -> usize {
        genes.iter().zip(&self.target).filter(|(a, b)| a == b).count()
    }

    fn optimal_fitness(&self) -> usize {
        self.target.len()
    }
}

// ===========================================================================
// OneMax with a pool and single-point crossover
// ===========================================================================

struct OneMax {
    n: usize,
}

impl GeneticProblem for OneMax {
    type Gene = bool;
    type Fitness = usize;

    fn gene_set(&self) -> &[bool] {
        &[false, true]
    }

    fn fitness(&self, genes: &[bool]) -> usize {
        genes.iter().filter(|&&b| b).count()
    }

    fn optimal_fitness(&self) -> usize {
        self.n
    }

    fn uses_crossover(&self) -> bool {
        true
    }

    fn crossover<R: Rng>(&self, parent: &[bool], donor: &[bool], rng: &mut R) -> Option<Vec<bool>> {
        if parent == donor {
            return None;
        }
        let point = rng.random_range(0..self.n);
        let mut child = parent[..point].to_vec();
        child.extend_from_slice(&donor[point..]);
        Some(child)
    }
}

// ===========================================================================
// Tournament: bigger number wins
// ===========================================================================

struct Numbers;

impl TournamentProblem for Numbers {
    type Genes = u32;
    type Key = usize;

    fn generate<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(0..1000)
    }

    fn crossover<R: Rng>(&self, a: &u32, b: &u32, rng: &mut R) -> u32 {
        (*a).max(*b) + rng.random_range(0..10)
    }

    fn compete(&self, a: &u32, b: &u32) -> CompetitionResult {
        match a.cmp(b) {
            Ordering::Greater => CompetitionResult::Win,
            Ordering::Equal => CompetitionResult::Tie,
            Ordering::Less => CompetitionResult::Loss,
        }
    }

    fn sort_key(&self, _genes: &u32, record: &Record) -> usize {
        record.wins
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_password(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_password");
    group.sample_size(10);

    for &len in &[10usize, 50, 100] {
        let problem = Password::new(len);
        let config = EvolveConfig::new(len).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(len), &(problem, config), |b, (p, c)| {
            b.iter(|| {
                let result = EvolveRunner::get_best(black_box(p), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_onemax_pooled(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_onemax_pooled");
    group.sample_size(10);

    for (n, pool) in [(50usize, 5usize), (100, 10), (200, 10)] {
        let problem = OneMax { n };
        let config = EvolveConfig::new(n)
            .with_pool_size(pool)
            .with_max_age(30)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_pool{}", n, pool), n),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = EvolveRunner::get_best(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_tournament(c: &mut Criterion) {
    let mut group = c.benchmark_group("tournament_numbers");
    group.sample_size(10);

    for &parents in &[3usize, 5, 8] {
        let config = TournamentConfig::default()
            .with_num_parents(parents)
            .with_max_generations(10)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(parents), &config, |b, c| {
            b.iter(|| {
                let result = TournamentRunner::run(black_box(&Numbers), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_password, bench_onemax_pooled, bench_tournament);
criterion_main!(benches);
