//! The improvement stream: pooled hill climbing with aging and annealing.
//!
//! # Algorithm
//!
//! 1. Generate the first parent and emit it.
//! 2. Fill the pool with `pool_size - 1` further candidates, emitting each
//!    one that beats the best so far.
//! 3. Visit pool slots in reverse round-robin order. For each parent ask
//!    the strategy dispatcher for a child, then:
//!    - worse child: discard it, unless aging is enabled and the parent has
//!      reached `max_age`, in which case the child replaces the parent with
//!      probability `exp(-p)` (`p` = share of historical bests at or above
//!      the child) and the global best replaces it otherwise;
//!    - equal child: always replaces the parent, inheriting its age + 1;
//!    - better child: replaces the parent with age 0, and is emitted when it
//!      also beats the global best.
//!
//! The stream never ends on its own. It stops after emitting
//! [`Improvement::TimedOut`] when a time limit is configured.

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::Rng;

use super::config::EvolveConfig;
use super::history::HistoricalFitness;
use super::operators::{crossover, generate_parent, mutate};
use super::strategy::StrategyDispatcher;
use super::types::{ChromosomeOf, GeneticProblem, Improvement, Strategy};
use crate::error::{EvolveError, Result};

type Step<P> = Option<Result<Improvement<<P as GeneticProblem>::Gene, <P as GeneticProblem>::Fitness>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    FillingPool,
    Steady,
    Done,
}

/// A pull-based stream of strictly improving chromosomes.
///
/// Each call to [`next`](Iterator::next) runs the search until the next
/// global best is found, then suspends. All search state (pool, best,
/// historical fitness, strategy weights) lives in the stream.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_evolve::evolve::{EvolveConfig, GeneticProblem, Improvement, ImprovementStream};
///
/// struct Ones;
///
/// impl GeneticProblem for Ones {
///     type Gene = u8;
///     type Fitness = usize;
///     fn gene_set(&self) -> &[u8] { &[0, 1] }
///     fn fitness(&self, genes: &[u8]) -> usize { genes.iter().filter(|&&g| g == 1).count() }
///     fn optimal_fitness(&self) -> usize { 16 }
/// }
///
/// let config = EvolveConfig::new(16);
/// let rng = rand::rngs::StdRng::seed_from_u64(7);
/// let stream = ImprovementStream::new(&Ones, &config, rng).unwrap();
///
/// let mut last = None;
/// for event in stream {
///     let Improvement::Better(c) = event.unwrap() else { break };
///     assert!(last.map_or(true, |f| *c.fitness() > f));
///     last = Some(*c.fitness());
///     if *c.fitness() == 16 {
///         break;
///     }
/// }
/// assert_eq!(last, Some(16));
/// ```
pub struct ImprovementStream<'a, P: GeneticProblem, R: Rng> {
    problem: &'a P,
    config: &'a EvolveConfig,
    rng: R,
    start: Instant,
    state: State,
    pool: Vec<ChromosomeOf<P>>,
    best: ChromosomeOf<P>,
    history: HistoricalFitness<P::Fitness>,
    dispatcher: StrategyDispatcher,
    parent_index: usize,
}

impl<'a, P: GeneticProblem, R: Rng> ImprovementStream<'a, P, R> {
    /// Starts the clock and generates the first parent.
    ///
    /// Fails when the configuration is invalid or the first candidate
    /// cannot be generated.
    pub fn new(problem: &'a P, config: &'a EvolveConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let first = generate_parent(problem, config.target_length, &mut rng)?;

        let mut pool = Vec::with_capacity(config.pool_size);
        pool.push(first.clone());

        Ok(Self {
            problem,
            config,
            rng,
            start,
            state: State::Init,
            pool,
            history: HistoricalFitness::new(first.fitness().clone()),
            best: first,
            dispatcher: StrategyDispatcher::new(problem.uses_crossover()),
            parent_index: 1,
        })
    }

    /// The best chromosome found so far.
    pub fn best(&self) -> &ChromosomeOf<P> {
        &self.best
    }

    /// The current parent pool.
    pub fn pool(&self) -> &[ChromosomeOf<P>] {
        &self.pool
    }

    pub fn history(&self) -> &HistoricalFitness<P::Fitness> {
        &self.history
    }

    pub fn dispatcher(&self) -> &StrategyDispatcher {
        &self.dispatcher
    }

    /// Time since the stream was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn timed_out(&self) -> bool {
        self.config
            .time_limit
            .is_some_and(|limit| self.start.elapsed() > limit)
    }

    fn timeout(&mut self) -> Step<P> {
        self.state = State::Done;
        info!(
            "time limit reached after {:?}, best fitness {:?}",
            self.start.elapsed(),
            self.best.fitness()
        );
        Some(Ok(Improvement::TimedOut(self.best.clone())))
    }

    fn fail(&mut self, error: EvolveError) -> Step<P> {
        self.state = State::Done;
        Some(Err(error))
    }

    /// Makes `candidate` the global best and returns the event to emit.
    fn improve(&mut self, candidate: ChromosomeOf<P>) -> Step<P> {
        debug!(
            "new best {:?} via {:?} after {:?}",
            candidate.fitness(),
            candidate.strategy,
            self.start.elapsed()
        );
        self.history.push(candidate.fitness().clone());
        self.dispatcher.record(candidate.strategy);
        self.best = candidate;
        Some(Ok(Improvement::Better(self.best.clone())))
    }

    /// Produces a child of the parent at `index`.
    ///
    /// The flag is false when the crossover fallback refilled the parent's
    /// own slot, which only happens in a single-slot pool.
    fn new_child(&mut self, index: usize) -> Result<(ChromosomeOf<P>, bool)> {
        let length = self.config.target_length;
        match self.dispatcher.choose(&mut self.rng) {
            Strategy::Crossover => {
                let child = crossover(self.problem, index, &mut self.pool, length, &mut self.rng)?;
                let refilled = self.pool.len() == 1 && child.strategy == Strategy::Mutate;
                Ok((child, !refilled))
            }
            Strategy::Create => Ok((generate_parent(self.problem, length, &mut self.rng)?, true)),
            Strategy::Mutate | Strategy::None => {
                Ok((mutate(self.problem, &self.pool[index], &mut self.rng), true))
            }
        }
    }

    fn fill_pool(&mut self) -> Step<P> {
        while self.pool.len() < self.config.pool_size {
            if self.timed_out() {
                return self.timeout();
            }
            let candidate =
                match generate_parent(self.problem, self.config.target_length, &mut self.rng) {
                    Ok(c) => c,
                    Err(e) => return self.fail(e),
                };
            let improves = candidate.fitness() > self.best.fitness();
            self.pool.push(candidate.clone());
            if improves {
                return self.improve(candidate);
            }
        }
        self.state = State::Steady;
        self.steady()
    }

    fn steady(&mut self) -> Step<P> {
        loop {
            if self.timed_out() {
                return self.timeout();
            }

            self.parent_index = if self.parent_index > 0 {
                self.parent_index - 1
            } else {
                self.pool.len() - 1
            };
            let index = self.parent_index;
            let parent_fitness = self.pool[index].fitness().clone();
            let parent_age = self.pool[index].age;

            let (mut child, parent_kept) = match self.new_child(index) {
                Ok(c) => c,
                Err(e) => return self.fail(e),
            };

            match child.fitness().cmp(&parent_fitness) {
                Ordering::Less => {
                    let Some(max_age) = self.config.max_age else {
                        continue;
                    };
                    let age = parent_age + 1;
                    if parent_kept {
                        self.pool[index].age = age;
                    }
                    if max_age > age {
                        continue;
                    }

                    let probability = self.history.acceptance_probability(child.fitness());
                    if self.rng.random_range(0.0..1.0) < probability {
                        trace!(
                            "slot {index}: accepted worse child {:?} (p = {probability:.3})",
                            child.fitness()
                        );
                        self.pool[index] = child;
                    } else {
                        let mut best = self.best.clone();
                        best.age = 0;
                        self.pool[index] = best;
                    }
                }
                Ordering::Equal => {
                    child.age = parent_age + 1;
                    self.pool[index] = child;
                }
                Ordering::Greater => {
                    child.age = 0;
                    let improves = child.fitness() > self.best.fitness();
                    if !improves {
                        self.pool[index] = child;
                        continue;
                    }
                    self.pool[index] = child.clone();
                    return self.improve(child);
                }
            }
        }
    }
}

impl<P: GeneticProblem, R: Rng> Iterator for ImprovementStream<'_, P, R> {
    type Item = Result<Improvement<P::Gene, P::Fitness>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Init => {
                self.state = State::FillingPool;
                if self.timed_out() {
                    return self.timeout();
                }
                self.dispatcher.record(self.best.strategy);
                Some(Ok(Improvement::Better(self.best.clone())))
            }
            State::FillingPool => self.fill_pool(),
            State::Steady => self.steady(),
            State::Done => None,
        }
    }
}

impl<P: GeneticProblem, R: Rng> FusedIterator for ImprovementStream<'_, P, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    /// Matches a fixed byte string.
    struct Password {
        target: Vec<u8>,
        gene_set: Vec<u8>,
    }

    impl Password {
        fn new(target: &str) -> Self {
            Self {
                target: target.bytes().collect(),
                gene_set: (b'a'..=b'z').chain([b' ', b'!']).collect(),
            }
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

    /// Pool members are numbered as they are created. Every child scores
    /// 1000 below its parent, and the parents handed to `mutate` are
    /// recorded.
    struct Sinking {
        created: RefCell<i64>,
        visited: RefCell<Vec<i64>>,
    }

    impl Sinking {
        fn new() -> Self {
            Self {
                created: RefCell::new(100),
                visited: RefCell::new(Vec::new()),
            }
        }
    }

    impl GeneticProblem for Sinking {
        type Gene = i64;
        type Fitness = i64;

        fn gene_set(&self) -> &[i64] {
            &[]
        }

        fn fitness(&self, genes: &[i64]) -> i64 {
            genes[0]
        }

        fn optimal_fitness(&self) -> i64 {
            i64::MAX
        }

        fn create<R: Rng>(&self, _rng: &mut R) -> Option<Vec<i64>> {
            let mut next = self.created.borrow_mut();
            let genes = vec![*next];
            *next += 1;
            Some(genes)
        }

        fn mutate<R: Rng>(&self, genes: &mut Vec<i64>, _rng: &mut R) {
            self.visited.borrow_mut().push(genes[0]);
            genes[0] -= 1000;
        }
    }

    /// Genes are `[value, tick]` and fitness is `value`. Candidates are
    /// numbered from 100. Mutation raises `value` towards `cap`, then only
    /// bumps `tick`, giving equal-fitness children.
    struct Capped {
        created: RefCell<i64>,
        cap: i64,
    }

    impl Capped {
        fn new(cap: i64) -> Self {
            Self {
                created: RefCell::new(100),
                cap,
            }
        }
    }

    impl GeneticProblem for Capped {
        type Gene = i64;
        type Fitness = i64;

        fn gene_set(&self) -> &[i64] {
            &[]
        }

        fn fitness(&self, genes: &[i64]) -> i64 {
            genes[0]
        }

        fn optimal_fitness(&self) -> i64 {
            i64::MAX
        }

        fn create<R: Rng>(&self, _rng: &mut R) -> Option<Vec<i64>> {
            let mut next = self.created.borrow_mut();
            let genes = vec![*next, 0];
            *next += 1;
            Some(genes)
        }

        fn mutate<R: Rng>(&self, genes: &mut Vec<i64>, _rng: &mut R) {
            if genes[0] < self.cap {
                genes[0] += 1;
            } else {
                genes[1] += 1;
            }
        }
    }

    /// Every child is its parent plus one; crossover is never possible.
    struct Counter;

    impl GeneticProblem for Counter {
        type Gene = u32;
        type Fitness = u32;

        fn gene_set(&self) -> &[u32] {
            &[0]
        }

        fn fitness(&self, genes: &[u32]) -> u32 {
            genes[0]
        }

        fn optimal_fitness(&self) -> u32 {
            u32::MAX
        }

        fn create<R: Rng>(&self, _rng: &mut R) -> Option<Vec<u32>> {
            Some(vec![0])
        }

        fn mutate<R: Rng>(&self, genes: &mut Vec<u32>, _rng: &mut R) {
            genes[0] += 1;
        }

        fn uses_crossover(&self) -> bool {
            true
        }
    }

    fn drain<P: GeneticProblem, R: Rng>(
        stream: ImprovementStream<'_, P, R>,
    ) -> Vec<Improvement<P::Gene, P::Fitness>> {
        stream.map(|event| event.unwrap()).collect()
    }

    #[test]
    fn test_improvements_strictly_increase() {
        let problem = Password::new("hello world!");
        let config = EvolveConfig::new(12);
        let stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(42)).unwrap();

        let mut fitnesses = Vec::new();
        for event in stream {
            let Improvement::Better(c) = event.unwrap() else {
                panic!("no time limit configured");
            };
            fitnesses.push(*c.fitness());
            if *c.fitness() == 12 {
                break;
            }
        }

        assert_eq!(fitnesses.last(), Some(&12));
        assert!(fitnesses.windows(2).all(|w| w[0] < w[1]), "{fitnesses:?}");
    }

    #[test]
    fn test_first_event_is_created_parent() {
        let problem = Password::new("abc");
        let config = EvolveConfig::new(3);
        let mut stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(1)).unwrap();

        let first = stream.next().unwrap().unwrap();
        assert_eq!(first.chromosome().strategy, Strategy::Create);
        assert_eq!(first.chromosome(), stream.best());
        assert_eq!(stream.dispatcher().history(), &[Strategy::Mutate, Strategy::Create]);
    }

    #[test]
    fn test_pool_visited_in_reverse_round_robin() {
        let problem = Sinking::new();
        let config = EvolveConfig::default()
            .with_pool_size(5)
            .with_time_limit_ms(20);
        let stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0)).unwrap();
        let events = drain(stream);

        // Fill-pool candidates 101..=104 each beat the previous best.
        let bests: Vec<i64> = events.iter().map(|e| *e.chromosome().fitness()).collect();
        assert_eq!(bests, vec![100, 101, 102, 103, 104, 104]);
        assert!(events.last().unwrap().is_timeout());

        let visited = problem.visited.borrow();
        assert!(visited.len() >= 6, "too few children: {}", visited.len());
        assert_eq!(&visited[..6], &[100, 104, 103, 102, 101, 100]);
    }

    #[test]
    fn test_worse_children_discarded_without_aging() {
        let problem = Sinking::new();
        let config = EvolveConfig::default().with_time_limit_ms(20);
        let stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0)).unwrap();
        let events = drain(stream);

        assert_eq!(events.len(), 2);
        assert!(problem.visited.borrow().iter().all(|&g| g == 100));
    }

    #[test]
    fn test_aged_parent_anneals() {
        let problem = Sinking::new();
        let config = EvolveConfig::default()
            .with_max_age(3)
            .with_time_limit_ms(30);
        let stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(4)).unwrap();
        let _ = drain(stream);

        let visited = problem.visited.borrow();
        // The first three children only age the parent.
        assert_eq!(&visited[..3], &[100, 100, 100]);
        // Eventually a worse child is accepted as a parent...
        assert!(visited.iter().any(|&g| g < 100));
        // ...and the best is reinstated at least once after rejection.
        let reinstated = visited.windows(2).any(|w| w[0] < 100 && w[1] == 100);
        assert!(reinstated, "best was never restored");
    }

    #[test]
    fn test_stream_is_fused_after_timeout() {
        let problem = Sinking::new();
        let config = EvolveConfig::default().with_time_limit_ms(5);
        let mut stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0)).unwrap();

        assert!(matches!(stream.next(), Some(Ok(Improvement::Better(_)))));
        assert!(matches!(stream.next(), Some(Ok(Improvement::TimedOut(_)))));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_history_tracks_emitted_bests() {
        let problem = Password::new("evolution");
        let config = EvolveConfig::new(9).with_pool_size(3).with_max_age(20);
        let mut stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(8)).unwrap();

        let mut emitted = Vec::new();
        for event in stream.by_ref() {
            let c = event.unwrap().into_chromosome();
            emitted.push(*c.fitness());
            if *c.fitness() == 9 {
                break;
            }
        }

        assert_eq!(stream.history().as_slice(), emitted.as_slice());
        assert_eq!(stream.pool().len(), 3);
    }

    #[test]
    fn test_equal_children_always_replace_and_age() {
        let problem = Capped::new(100);
        let config = EvolveConfig::default()
            .with_max_age(2)
            .with_time_limit_ms(20);
        let mut stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0)).unwrap();

        let events: Vec<_> = stream.by_ref().map(|e| e.unwrap()).collect();
        assert_eq!(events.len(), 2);
        assert!(events[1].is_timeout());

        // Lateral moves are never retired, however old they get.
        let slot = &stream.pool()[0];
        assert_eq!(*slot.fitness(), 100);
        assert_eq!(slot.strategy, Strategy::Mutate);
        assert!(slot.age > 2, "age {}", slot.age);
        assert_eq!(slot.age, slot.genes()[1] as usize);
    }

    #[test]
    fn test_local_improvement_replaces_slot_without_emitting() {
        let problem = Capped::new(101);
        let config = EvolveConfig::default()
            .with_pool_size(2)
            .with_time_limit_ms(20);
        let mut stream = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0)).unwrap();

        let fitnesses: Vec<i64> = stream
            .by_ref()
            .map(|e| *e.unwrap().chromosome().fitness())
            .collect();
        // 100 is created, 101 fills the pool, then the timeout repeats 101.
        assert_eq!(fitnesses, vec![100, 101, 101]);

        // Slot 0 climbed from 100 to 101 on its own but never became best.
        assert_eq!(*stream.pool()[0].fitness(), 101);
        assert_eq!(stream.pool()[0].strategy, Strategy::Mutate);
        assert_eq!(stream.best().strategy, Strategy::Create);
        assert_eq!(stream.history().as_slice(), &[100, 101]);
    }

    #[test]
    fn test_crossover_fallback_in_single_slot_pool_mutates_parent() {
        let config = EvolveConfig::new(1);
        let stream = ImprovementStream::new(&Counter, &config, StdRng::seed_from_u64(3)).unwrap();

        let fitnesses: Vec<u32> = stream
            .take(8)
            .map(|e| *e.unwrap().chromosome().fitness())
            .collect();
        assert_eq!(fitnesses, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = Password::new("abc");
        let config = EvolveConfig::new(3).with_pool_size(0);
        let result = ImprovementStream::new(&problem, &config, StdRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(EvolveError::InvalidConfig(ConfigError::PoolSizeZero))
        ));
    }
}
