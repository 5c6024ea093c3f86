//! Hill-climbing meta-optimizer.
//!
//! Reruns an inner optimization at different values of a structural
//! parameter (for example the number of gates a circuit may use), keeping a
//! new best only when it improves on the previous one, until the best is
//! optimal. Users implement [`HillClimbProblem`]; the inner optimization is
//! usually an [`EvolveRunner`](crate::evolve::EvolveRunner) run.

mod config;
mod runner;
mod types;

pub use config::HillClimbConfig;
pub use runner::{HillClimbResult, HillClimbRunner};
pub use types::HillClimbProblem;
