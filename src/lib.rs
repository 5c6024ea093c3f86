//! Domain-agnostic evolutionary local search.
//!
//! Provides one generic search core for puzzle-style optimization problems:
//!
//! - **Evolve**: Pooled hill climbing over gene sequences with aging,
//!   annealing-style acceptance of worse children, pluggable creation,
//!   mutation and crossover, adaptive strategy weighting and a wall-clock
//!   time limit.
//! - **Hill Climbing**: An outer loop that reruns a search at different
//!   values of a structural parameter to find the smallest structure that
//!   still reaches the target.
//! - **Tournament**: Co-evolution where fitness is relative, defined by
//!   round-robin games within the current population.
//!
//! # Architecture
//!
//! The crate contains no puzzle-specific concepts. Boards, instance
//! parsers, simulators and rendering belong to callers, which plug in
//! through the [`evolve::GeneticProblem`], [`hill_climb::HillClimbProblem`]
//! and [`tournament::TournamentProblem`] traits.

pub mod error;
pub mod evolve;
pub mod hill_climb;
pub mod tournament;

pub use error::{ConfigError, EvolveError, Result};
