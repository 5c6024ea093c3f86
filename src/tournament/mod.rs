//! Tournament engine for relative fitness.
//!
//! Some problems have no absolute fitness function: a tic-tac-toe strategy
//! is only good relative to the strategies it plays against. The tournament
//! engine evolves a population by letting every member compete with every
//! other member, ranking them by their win/tie/loss records, and breeding
//! the next generation from the top ranks.
//!
//! Users implement [`TournamentProblem`].

mod config;
mod runner;
mod types;

pub use config::TournamentConfig;
pub use runner::{GenerationStats, TournamentResult, TournamentRunner};
pub use types::{CompetitionResult, Record, TournamentProblem};
