//! Round-robin tournament among a named roster

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::run_match;
use crate::payoff::PayoffTable;
use crate::strategy::Roster;

/// Total score for one roster entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub score: i64,
}

/// Tournament totals, in roster order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub entries: Vec<Standing>,
    pub matches_played: usize,
}

impl Standings {
    pub fn score(&self, name: &str) -> Option<i64> {
        self.entries.iter().find(|s| s.name == name).map(|s| s.score)
    }

    /// Entries by descending score; equal scores keep roster order
    pub fn ranked(&self) -> Vec<&Standing> {
        let mut ranked: Vec<&Standing> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Standing> {
        self.entries.iter()
    }
}

/// Number of matches in a round robin of `n` entrants: C(n, 2)
pub fn calculate_match_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Play every unordered pair of distinct roster entries exactly once.
///
/// The earlier roster entry is player A. Each entrant's total is the sum
/// of its scores over every match it took part in.
pub fn run_tournament<R: Rng + ?Sized>(
    roster: &Roster<'_>,
    rounds_per_match: usize,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> Standings {
    let entrants: Vec<_> = roster.iter().collect();
    let mut totals = vec![0i64; entrants.len()];
    let mut matches_played = 0;

    for i in 0..entrants.len() {
        for j in (i + 1)..entrants.len() {
            let (name_a, strategy_a) = entrants[i];
            let (name_b, strategy_b) = entrants[j];

            let result = run_match(&strategy_a, &strategy_b, rounds_per_match, payoffs, rng);
            totals[i] += result.score_a;
            totals[j] += result.score_b;
            matches_played += 1;

            debug!(
                a = name_a,
                b = name_b,
                score_a = result.score_a,
                score_b = result.score_b,
                "tournament match"
            );
        }
    }

    let entries = entrants
        .iter()
        .zip(totals)
        .map(|((name, _), score)| Standing {
            name: name.to_string(),
            score,
        })
        .collect();

    Standings {
        entries,
        matches_played,
    }
}
