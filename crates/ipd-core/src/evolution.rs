//! Generational step and the full genetic algorithm loop

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fitness::evaluate_population;
use crate::genome::{crossover, mutate, Individual};
use crate::payoff::PayoffTable;
use crate::selection::{select_survivors, survivor_count};
use crate::strategy::Roster;

/// Per-generation GA parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    /// Rounds per fitness match
    pub rounds: usize,
    /// Per-gene flip probability, in [0, 1]
    pub mutation_rate: f64,
    /// Share of the population kept as parents, in (0, 1]
    pub survivor_fraction: f64,
    /// Top survivors copied unchanged into the next generation
    pub elite_count: usize,
}

/// Result of one generation
#[derive(Clone, Debug)]
pub struct GenerationOutcome {
    /// Next population, same size as the input
    pub population: Vec<Individual>,
    /// First individual (in population order) with the best fitness
    pub best: Individual,
    pub best_fitness: i64,
    pub mean_fitness: f64,
}

/// One point of the fitness trace
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: i64,
    pub mean_fitness: f64,
}

/// Result of a full GA run
#[derive(Clone, Debug)]
pub struct EvolutionOutcome {
    /// Best individual seen in any generation (earliest on ties)
    pub best: Individual,
    pub best_fitness: i64,
    pub trace: Vec<GenerationRecord>,
    pub population: Vec<Individual>,
}

/// Fresh population of random individuals
pub fn initialize_population<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Individual> {
    (0..size).map(|_| Individual::random(rng)).collect()
}

/// Evaluate, select and reproduce once.
///
/// 1. Fitness of every individual, in population order.
/// 2. Best individual: first occurrence of the maximum.
/// 3. Keep the top `survivor_count` by stable ranking.
/// 4. Copy the first `elite_count` survivors unchanged.
/// 5. Fill up with `mutate(crossover(p1, p2))`, parents drawn uniformly
///    with replacement from the survivors.
///
/// # Panics
/// Panics if `population` is empty.
pub fn generation_step<R: Rng + ?Sized>(
    population: &[Individual],
    opponents: &Roster<'_>,
    params: &GeneticParams,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> GenerationOutcome {
    assert!(!population.is_empty(), "Population cannot be empty");

    let fitnesses = evaluate_population(population, opponents, params.rounds, payoffs, rng);

    let mut best_idx = 0;
    for (i, fitness) in fitnesses.iter().enumerate() {
        if *fitness > fitnesses[best_idx] {
            best_idx = i;
        }
    }
    let best_fitness = fitnesses[best_idx];
    let mean_fitness = fitnesses.iter().sum::<i64>() as f64 / fitnesses.len() as f64;

    let keep = survivor_count(population.len(), params.survivor_fraction);
    let survivors = select_survivors(population, &fitnesses, keep);

    let mut next: Vec<Individual> = Vec::with_capacity(population.len());
    next.extend(survivors.iter().take(params.elite_count).cloned());

    while next.len() < population.len() {
        let parent_a = &survivors[rng.gen_range(0..survivors.len())];
        let parent_b = &survivors[rng.gen_range(0..survivors.len())];
        let child = crossover(parent_a, parent_b, rng);
        next.push(mutate(&child, params.mutation_rate, rng));
    }

    debug!(
        best_fitness,
        mean_fitness,
        survivors = survivors.len(),
        "generation evaluated"
    );

    GenerationOutcome {
        population: next,
        best: population[best_idx].clone(),
        best_fitness,
        mean_fitness,
    }
}

/// Run the GA from a random population.
///
/// At least one generation always runs, so a best individual exists.
pub fn evolve<R: Rng + ?Sized>(
    opponents: &Roster<'_>,
    population_size: usize,
    num_generations: usize,
    params: &GeneticParams,
    payoffs: &PayoffTable,
    rng: &mut R,
) -> EvolutionOutcome {
    evolve_with_callback(
        opponents,
        population_size,
        num_generations,
        params,
        payoffs,
        rng,
        |_| {},
    )
}

/// `evolve`, reporting each generation's record as it completes
pub fn evolve_with_callback<R, F>(
    opponents: &Roster<'_>,
    population_size: usize,
    num_generations: usize,
    params: &GeneticParams,
    payoffs: &PayoffTable,
    rng: &mut R,
    mut on_generation: F,
) -> EvolutionOutcome
where
    R: Rng + ?Sized,
    F: FnMut(&GenerationRecord),
{
    let mut population = initialize_population(population_size, rng);
    let mut best: Option<(Individual, i64)> = None;
    let mut trace = Vec::with_capacity(num_generations.max(1));

    for generation in 0..num_generations.max(1) {
        let outcome = generation_step(&population, opponents, params, payoffs, rng);

        let record = GenerationRecord {
            generation,
            best_fitness: outcome.best_fitness,
            mean_fitness: outcome.mean_fitness,
        };
        debug!(
            generation,
            best_fitness = record.best_fitness,
            mean_fitness = record.mean_fitness,
            "generation complete"
        );
        on_generation(&record);
        trace.push(record);

        if best.as_ref().map_or(true, |(_, f)| outcome.best_fitness > *f) {
            best = Some((outcome.best, outcome.best_fitness));
        }
        population = outcome.population;
    }

    // The loop body runs at least once.
    let (best, best_fitness) = best.unwrap_or_else(|| (population[0].clone(), i64::MIN));

    EvolutionOutcome {
        best,
        best_fitness,
        trace,
        population,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use crate::strategy::{FixedStrategy, Move};
    use proptest::prelude::*;

    fn versus(fixed: FixedStrategy) -> Roster<'static> {
        let mut roster = Roster::new();
        roster.insert(fixed.name(), fixed.into());
        roster
    }

    fn params(survivor_fraction: f64, elite_count: usize) -> GeneticParams {
        GeneticParams {
            rounds: 5,
            mutation_rate: 0.05,
            survivor_fraction,
            elite_count,
        }
    }

    #[test]
    fn test_step_reports_first_best() {
        let population = vec![
            Individual::uniform(Move::Cooperate),
            Individual::uniform(Move::Defect),
            Individual::uniform(Move::Defect),
        ];
        let mut rng = seeded_rng(1);
        let outcome = generation_step(
            &population,
            &versus(FixedStrategy::AlwaysCooperate),
            &params(0.5, 1),
            &PayoffTable::default(),
            &mut rng,
        );

        assert_eq!(outcome.best_fitness, 25);
        assert_eq!(outcome.best, Individual::uniform(Move::Defect));
        assert!((outcome.mean_fitness - (15.0 + 25.0 + 25.0) / 3.0).abs() < 1e-9);
        assert_eq!(outcome.population.len(), 3);
        // The elite is the best survivor, unchanged
        assert_eq!(outcome.population[0], Individual::uniform(Move::Defect));
    }

    #[test]
    fn test_step_with_tiny_survivor_fraction_still_fills() {
        let mut rng = seeded_rng(2);
        let population = initialize_population(10, &mut rng);
        let outcome = generation_step(
            &population,
            &versus(FixedStrategy::TitForTat),
            &params(0.01, 0),
            &PayoffTable::default(),
            &mut rng,
        );
        assert_eq!(outcome.population.len(), 10);
    }

    #[test]
    fn test_single_survivor_no_mutation_clones_the_best() {
        let population = vec![
            Individual::uniform(Move::Cooperate),
            Individual::uniform(Move::Defect),
        ];
        let params = GeneticParams {
            rounds: 5,
            mutation_rate: 0.0,
            survivor_fraction: 0.5,
            elite_count: 0,
        };
        let outcome = generation_step(
            &population,
            &versus(FixedStrategy::AlwaysCooperate),
            &params,
            &PayoffTable::default(),
            &mut seeded_rng(3),
        );
        assert!(outcome.population.iter().all(|i| *i == Individual::uniform(Move::Defect)));
    }

    #[test]
    fn test_elite_count_larger_than_survivors() {
        let mut rng = seeded_rng(4);
        let population = initialize_population(6, &mut rng);
        let outcome = generation_step(
            &population,
            &versus(FixedStrategy::Prober),
            &params(0.5, 100),
            &PayoffTable::default(),
            &mut rng,
        );
        assert_eq!(outcome.population.len(), 6);
    }

    #[test]
    #[should_panic(expected = "Population cannot be empty")]
    fn test_empty_population_panics() {
        generation_step(
            &[],
            &versus(FixedStrategy::AlwaysCooperate),
            &params(0.5, 1),
            &PayoffTable::default(),
            &mut seeded_rng(0),
        );
    }

    #[test]
    fn test_evolve_trace_and_best() {
        let mut rng = seeded_rng(10);
        let mut seen = Vec::new();
        let outcome = evolve_with_callback(
            &versus(FixedStrategy::AlwaysCooperate),
            12,
            8,
            &params(0.5, 2),
            &PayoffTable::default(),
            &mut rng,
            |record| seen.push(record.generation),
        );

        assert_eq!(outcome.trace.len(), 8);
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
        assert_eq!(outcome.population.len(), 12);

        let max = outcome.trace.iter().map(|r| r.best_fitness).max().unwrap();
        assert_eq!(outcome.best_fitness, max);
        assert!(outcome.best_fitness <= 25);

        // Against a deterministic opponent, elitism never loses ground
        for pair in outcome.trace.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
        }
    }

    #[test]
    fn test_evolve_best_scores_its_fitness() {
        let opponents = versus(FixedStrategy::AlwaysCooperate);
        let outcome = evolve(
            &opponents,
            8,
            3,
            &params(0.5, 1),
            &PayoffTable::default(),
            &mut seeded_rng(11),
        );
        let rescored = crate::fitness::evaluate_individual(
            &outcome.best,
            &opponents,
            5,
            &PayoffTable::default(),
            &mut seeded_rng(0),
        );
        assert_eq!(rescored, outcome.best_fitness);
    }

    #[test]
    fn test_zero_generations_runs_one() {
        let outcome = evolve(
            &versus(FixedStrategy::AlwaysDefect),
            4,
            0,
            &params(0.5, 1),
            &PayoffTable::default(),
            &mut seeded_rng(12),
        );
        assert_eq!(outcome.trace.len(), 1);
    }

    #[test]
    fn test_evolve_is_reproducible() {
        let run = |seed| {
            evolve(
                &Roster::fixed(),
                6,
                3,
                &params(0.5, 1),
                &PayoffTable::default(),
                &mut seeded_rng(seed),
            )
        };
        let (a, b) = (run(99), run(99));
        assert_eq!(a.trace, b.trace);
        assert_eq!(a.best, b.best);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn step_keeps_population_size(
            size in 1usize..16,
            survivor_fraction in 0.01f64..=1.0,
            elite_count in 0usize..20,
            seed in any::<u64>(),
        ) {
            let mut rng = seeded_rng(seed);
            let population = initialize_population(size, &mut rng);
            let params = GeneticParams { rounds: 6, mutation_rate: 0.1, survivor_fraction, elite_count };
            let outcome = generation_step(
                &population,
                &versus(FixedStrategy::GrimTrigger),
                &params,
                &PayoffTable::default(),
                &mut rng,
            );
            prop_assert_eq!(outcome.population.len(), size);
        }
    }
}
