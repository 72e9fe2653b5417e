//! Parameter sweeps over mutation rate and survivor fraction
//!
//! Each setting runs one full tournament-mode simulation and scores it by
//! the mean of the per-generation best fitness.

use serde::Serialize;
use tracing::info;

use ipd_core::{PayoffTable, Simulation, SimulationConfig};

pub const MUTATION_RATES: [f64; 5] = [0.01, 0.025, 0.05, 0.075, 0.1];
pub const SURVIVOR_FRACTIONS: [f64; 6] = [0.01, 0.05, 0.1, 0.15, 0.2, 0.25];

/// Starting point of every sweep run
pub fn experiment_base() -> SimulationConfig {
    SimulationConfig {
        mode: "Tournament".to_string(),
        rounds_per_match: 200,
        population_size: 100,
        num_generations: 50,
        mutation_rate: 0.05,
        survivor_fraction: 0.15,
        ..Default::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    pub mutation_rate: f64,
    pub survivor_fraction: f64,
    pub metric: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SweepReport {
    /// Mutation rate varied, survivor fraction at its base value
    pub mutation: Vec<SweepPoint>,
    /// Survivor fraction varied, mutation rate at its base value
    pub survivor: Vec<SweepPoint>,
    /// Every (mutation rate, survivor fraction) pair
    pub grid: Vec<SweepPoint>,
}

impl SweepReport {
    /// Highest-scoring point across all three sections
    pub fn best(&self) -> Option<&SweepPoint> {
        self.mutation
            .iter()
            .chain(&self.survivor)
            .chain(&self.grid)
            .max_by(|a, b| a.metric.total_cmp(&b.metric))
    }
}

/// Run one simulation to completion and return its metric
pub fn run_metric(config: &SimulationConfig, payoffs: &PayoffTable) -> f64 {
    let mut sim = Simulation::with_payoffs(config.clone(), *payoffs);
    sim.run_to_completion();
    sim.mean_best_fitness()
}

/// Sweep with `run` scoring each configuration.
///
/// The base configuration's mutation rate and survivor fraction are the
/// fixed values while the other parameter varies.
pub fn run_sweep<F>(
    base: &SimulationConfig,
    mutation_rates: &[f64],
    survivor_fractions: &[f64],
    include_grid: bool,
    mut run: F,
) -> SweepReport
where
    F: FnMut(&SimulationConfig) -> f64,
{
    let mut score = |mutation_rate: f64, survivor_fraction: f64| {
        let config = SimulationConfig {
            mutation_rate,
            survivor_fraction,
            ..base.clone()
        };
        let metric = run(&config);
        SweepPoint {
            mutation_rate,
            survivor_fraction,
            metric,
        }
    };

    let mut report = SweepReport::default();

    for &rate in mutation_rates {
        let point = score(rate, base.survivor_fraction);
        info!("Mutation Rate {}: Metric = {}", rate, point.metric);
        report.mutation.push(point);
    }

    for &fraction in survivor_fractions {
        let point = score(base.mutation_rate, fraction);
        info!("Survivor Fraction {}: Metric = {}", fraction, point.metric);
        report.survivor.push(point);
    }

    if include_grid {
        for &rate in mutation_rates {
            for &fraction in survivor_fractions {
                let point = score(rate, fraction);
                info!("Mutation {}, Survivor {}: Metric = {}", rate, fraction, point.metric);
                report.grid.push(point);
            }
        }
    }

    report
}
