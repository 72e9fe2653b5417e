//! Match execution engine

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::payoff::PayoffTable;
use crate::strategy::{Move, Strategy};

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub move_a: Move,
    pub move_b: Move,
    pub score_a: i32,
    pub score_b: i32,
    pub cumulative_a: i64,
    pub cumulative_b: i64,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub history_a: Vec<Move>,
    pub history_b: Vec<Move>,
    pub score_a: i64,
    pub score_b: i64,
}

impl MatchResult {
    pub fn round_count(&self) -> usize {
        self.history_a.len()
    }

    /// Round-by-round breakdown, re-scored under `payoffs`.
    ///
    /// Pass the table the match was played with to get the same totals.
    pub fn rounds(&self, payoffs: &PayoffTable) -> Vec<RoundResult> {
        let mut total_a = 0i64;
        let mut total_b = 0i64;

        self.history_a
            .iter()
            .zip(self.history_b.iter())
            .enumerate()
            .map(|(round, (&move_a, &move_b))| {
                let (score_a, score_b) = payoffs.payoff(move_a, move_b);
                total_a += score_a as i64;
                total_b += score_b as i64;
                RoundResult {
                    round,
                    move_a,
                    move_b,
                    score_a,
                    score_b,
                    cumulative_a: total_a,
                    cumulative_b: total_b,
                }
            })
            .collect()
    }
}

/// Run a complete match between two strategies
///
/// # Arguments
/// * `strategy_a` - First player's strategy
/// * `strategy_b` - Second player's strategy
/// * `rounds` - Number of rounds to play (0 gives an empty match)
/// * `payoffs` - Payoff table used for every round
/// * `rng` - Random source for randomized strategies; A draws before B
///
/// # Returns
/// Both move histories and both total scores
pub fn run_match<R: Rng + ?Sized>(
    strategy_a: &Strategy<'_>,
    strategy_b: &Strategy<'_>,
    rounds: usize,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> MatchResult {
    let mut history_a: Vec<Move> = Vec::with_capacity(rounds);
    let mut history_b: Vec<Move> = Vec::with_capacity(rounds);
    let mut total_a = 0i64;
    let mut total_b = 0i64;

    for _ in 0..rounds {
        // Both players see the same histories: moves are simultaneous
        let move_a = strategy_a.respond(&history_a, &history_b, payoffs, rng);
        let move_b = strategy_b.respond(&history_b, &history_a, payoffs, rng);

        let (score_a, score_b) = payoffs.payoff(move_a, move_b);
        total_a += score_a as i64;
        total_b += score_b as i64;

        history_a.push(move_a);
        history_b.push(move_b);
    }

    trace!(rounds, score_a = total_a, score_b = total_b, "match played");

    MatchResult {
        history_a,
        history_b,
        score_a: total_a,
        score_b: total_b,
    }
}
