//! Pooled hill climbing with annealing acceptance.
//!
//! The engine keeps a small pool of parents and repeatedly replaces them with
//! children produced by mutation, crossover or fresh creation. Worse children
//! are discarded until a parent has aged past `max_age`; then a worse child is
//! accepted with a probability derived from how it ranks against the run's
//! historical bests. Users define their problem by implementing
//! [`GeneticProblem`].
//!
//! # Key Types
//!
//! - [`EvolveConfig`]: pool size, aging, time limit, seed
//! - [`ImprovementStream`]: the search itself, as an iterator of new bests
//! - [`EvolveRunner`]: drives a stream to the optimal fitness
//! - [`EvolveResult`]: best chromosome and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: gene sampling and single-gene mutation, reusable in
//!   custom operators

mod config;
mod history;
pub mod operators;
mod runner;
mod strategy;
mod stream;
mod types;

pub use config::EvolveConfig;
pub use history::{acceptance_probability, HistoricalFitness};
pub use runner::{EvolveResult, EvolveRunner};
pub use strategy::{StrategyDispatcher, StrategyUsage};
pub use stream::ImprovementStream;
pub use types::{Chromosome, ChromosomeOf, GeneticProblem, Improvement, Strategy};
