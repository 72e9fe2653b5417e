//! Fitness of an individual against a fixed opponent roster

use rand::Rng;

use crate::game::run_match;
use crate::genome::Individual;
use crate::payoff::PayoffTable;
use crate::strategy::Roster;

/// Sum of the individual's scores (as player A) over one match against
/// every opponent, in roster order.
///
/// Randomized opponents make this a random variable; the draw order is
/// fixed by the roster order.
pub fn evaluate_individual<R: Rng + ?Sized>(
    individual: &Individual,
    opponents: &Roster<'_>,
    rounds: usize,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> i64 {
    let strategy = individual.as_strategy();

    opponents
        .iter()
        .map(|(_, opponent)| run_match(&strategy, &opponent, rounds, payoffs, rng).score_a)
        .sum()
}

/// Fitness of every individual, in population order
pub fn evaluate_population<R: Rng + ?Sized>(
    population: &[Individual],
    opponents: &Roster<'_>,
    rounds: usize,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> Vec<i64> {
    population
        .iter()
        .map(|individual| evaluate_individual(individual, opponents, rounds, payoffs, rng))
        .collect()
}
