//! Adaptive strategy selection.
//!
//! Every strategy that produced a new global best is appended to a list,
//! and children are produced by drawing uniformly from that list. A
//! strategy's selection probability is therefore proportional to how often
//! it has improved the run so far. The list only grows; there is no decay.

use rand::Rng;

use super::types::Strategy;

/// Counts of each strategy in the dispatcher's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyUsage {
    pub create: usize,
    pub mutate: usize,
    pub crossover: usize,
}

impl StrategyUsage {
    pub fn total(&self) -> usize {
        self.create + self.mutate + self.crossover
    }
}

/// Chooses which operator produces the next child.
#[derive(Debug, Clone)]
pub struct StrategyDispatcher {
    used: Vec<Strategy>,
    crossover_enabled: bool,
}

impl StrategyDispatcher {
    /// Seeds the history with `Mutate`, plus `Crossover` when enabled.
    pub fn new(crossover_enabled: bool) -> Self {
        let mut used = vec![Strategy::Mutate];
        if crossover_enabled {
            used.push(Strategy::Crossover);
        }
        Self {
            used,
            crossover_enabled,
        }
    }

    /// Records the strategy of a new global best.
    ///
    /// `Strategy::None` marks chromosomes built outside the engine and is
    /// ignored.
    pub fn record(&mut self, strategy: Strategy) {
        if strategy != Strategy::None {
            self.used.push(strategy);
        }
    }

    /// Draws the strategy for the next child.
    ///
    /// Without crossover the engine always mutates; the history is still
    /// kept so that usage can be reported.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Strategy {
        if !self.crossover_enabled {
            return Strategy::Mutate;
        }
        self.used[rng.random_range(0..self.used.len())]
    }

    pub fn history(&self) -> &[Strategy] {
        &self.used
    }

    pub fn usage(&self) -> StrategyUsage {
        let mut usage = StrategyUsage::default();
        for strategy in &self.used {
            match strategy {
                Strategy::Create => usage.create += 1,
                Strategy::Mutate => usage.mutate += 1,
                Strategy::Crossover => usage.crossover += 1,
                Strategy::None => {}
            }
        }
        usage
    }
}
