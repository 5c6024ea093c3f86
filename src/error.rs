//! Error types shared by all engines.

use thiserror::Error;

/// An invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pool_size must be at least 1")]
    PoolSizeZero,

    #[error("target_length must be at least 1 when genes are sampled from a gene set")]
    ZeroTargetLength,

    #[error("time limit must be positive or None")]
    ZeroTimeLimit,

    #[error("num_parents must be at least 1")]
    ZeroParents,

    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    #[error("num_parents = {0} makes the population size overflow")]
    PopulationOverflow(usize),
}

/// Errors raised by the search engines.
///
/// A timeout is not an error: runners report it through their result
/// structs (`timed_out`) together with the best candidate found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvolveError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No creator was supplied and the gene set is empty.
    #[error("gene set is empty and no custom creator is defined")]
    EmptyGeneSet,

    /// The improvement stream ended without reaching the optimal fitness
    /// and without timing out. The stream is infinite by construction, so
    /// this signals a broken contract rather than a search outcome.
    #[error("improvement stream ended before reaching the optimal fitness")]
    SearchExhausted,
}

pub type Result<T> = std::result::Result<T, EvolveError>;
