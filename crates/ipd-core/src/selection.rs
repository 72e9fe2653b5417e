//! Truncation selection

use tracing::warn;

use crate::genome::Individual;

/// How many survivors a population of `population_size` keeps.
///
/// `floor(population_size × survivor_fraction)`, but never fewer than one
/// survivor for a non-empty population, so reproduction always has a
/// parent to draw from.
pub fn survivor_count(population_size: usize, survivor_fraction: f64) -> usize {
    let count = (population_size as f64 * survivor_fraction).floor() as usize;
    let count = count.min(population_size);

    if count == 0 && population_size > 0 {
        warn!(
            population_size,
            survivor_fraction, "survivor fraction truncates to zero, keeping the single best"
        );
        return 1;
    }
    count
}

/// Rank by fitness, best first, and keep the top `survivor_count`.
///
/// The sort is stable: equal fitness keeps population order.
///
/// # Panics
/// Panics if `population` and `fitnesses` differ in length.
pub fn select_survivors(
    population: &[Individual],
    fitnesses: &[i64],
    survivor_count: usize,
) -> Vec<Individual> {
    assert_eq!(
        population.len(),
        fitnesses.len(),
        "Population and fitness must have same length"
    );

    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|&a, &b| fitnesses[b].cmp(&fitnesses[a]));

    ranked
        .into_iter()
        .take(survivor_count)
        .map(|i| population[i].clone())
        .collect()
}
