//! Core types for tournaments.

use rand::Rng;

/// Outcome of a game, from the first player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompetitionResult {
    Win,
    Tie,
    Loss,
}

impl CompetitionResult {
    /// The same outcome seen by the other player.
    pub fn mirror(self) -> Self {
        match self {
            CompetitionResult::Win => CompetitionResult::Loss,
            CompetitionResult::Tie => CompetitionResult::Tie,
            CompetitionResult::Loss => CompetitionResult::Win,
        }
    }
}

/// A running win/tie/loss tally for one population member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
}

impl Record {
    pub fn add(&mut self, result: CompetitionResult) {
        match result {
            CompetitionResult::Win => self.wins += 1,
            CompetitionResult::Tie => self.ties += 1,
            CompetitionResult::Loss => self.losses += 1,
        }
    }

    /// Games recorded.
    pub fn total(&self) -> usize {
        self.wins + self.ties + self.losses
    }
}

/// Defines a co-evolution problem for [`TournamentRunner`](super::TournamentRunner).
///
/// # Thread Safety
///
/// `TournamentProblem` must be `Sync` because games may be played in
/// parallel using rayon (`parallel` feature).
pub trait TournamentProblem: Sync {
    /// A population member.
    type Genes: Clone + Send + Sync;

    /// Ranking key derived from a member and its record. Higher ranks first.
    type Key: PartialOrd;

    /// Creates a random member.
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Genes;

    /// Breeds a child from two parents. Mutation, if any, happens here.
    fn crossover<R: Rng>(&self, a: &Self::Genes, b: &Self::Genes, rng: &mut R) -> Self::Genes;

    /// Plays one game with `a` moving first. Must be deterministic.
    fn compete(&self, a: &Self::Genes, b: &Self::Genes) -> CompetitionResult;

    /// Ranks a member by its record.
    fn sort_key(&self, genes: &Self::Genes, record: &Record) -> Self::Key;

    /// Called when a generation's top member improves on the best so far.
    fn display(&self, _genes: &Self::Genes, _record: &Record, _generation: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror() {
        assert_eq!(CompetitionResult::Win.mirror(), CompetitionResult::Loss);
        assert_eq!(CompetitionResult::Tie.mirror(), CompetitionResult::Tie);
        assert_eq!(CompetitionResult::Loss.mirror(), CompetitionResult::Win);
    }

    #[test]
    fn test_record_tally() {
        let mut record = Record::default();
        for result in [
            CompetitionResult::Win,
            CompetitionResult::Win,
            CompetitionResult::Tie,
            CompetitionResult::Loss,
        ] {
            record.add(result);
        }
        assert_eq!(record, Record { wins: 2, ties: 1, losses: 1 });
        assert_eq!(record.total(), 4);
    }
}
