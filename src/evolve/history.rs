//! Historical best fitness and the annealing acceptance rule.

/// The fitness of every global best seen during a run, in ascending order.
///
/// Serves as a percentile reference: a worse child is judged by how many
/// past bests it would rank below.
#[derive(Debug, Clone)]
pub struct HistoricalFitness<F> {
    values: Vec<F>,
}

impl<F: Ord> HistoricalFitness<F> {
    /// Starts the history with the run's first best.
    pub fn new(first: F) -> Self {
        Self {
            values: vec![first],
        }
    }

    /// Appends a new global best.
    ///
    /// New bests are never below the last recorded value, which keeps the
    /// history sorted without re-sorting.
    pub fn push(&mut self, fitness: F) {
        debug_assert!(
            self.values.last().is_none_or(|last| *last <= fitness),
            "historical fitness must be non-decreasing"
        );
        self.values.push(fitness);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.values
    }

    /// Leftmost position at which `fitness` could be inserted while keeping
    /// the history sorted.
    pub fn insertion_index(&self, fitness: &F) -> usize {
        self.values.partition_point(|h| h < fitness)
    }

    /// Fraction of historical bests at or above `fitness`, in `[0, 1]`.
    pub fn proportion_similar(&self, fitness: &F) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let count = self.values.len();
        (count - self.insertion_index(fitness)) as f64 / count as f64
    }

    /// Probability of accepting a worse child with the given fitness.
    pub fn acceptance_probability(&self, fitness: &F) -> f64 {
        acceptance_probability(self.proportion_similar(fitness))
    }
}

/// `exp(-proportion_similar)`.
///
/// A child that every past best beats is accepted with probability
/// `1/e`; one that matches the best of the history is almost always kept.
pub fn acceptance_probability(proportion_similar: f64) -> f64 {
    (-proportion_similar).exp()
}
