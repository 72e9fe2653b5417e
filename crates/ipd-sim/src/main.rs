mod sweep;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ipd_core::{FixedStrategy, PayoffTable, Phase, Simulation, SimulationConfig};

#[derive(Parser)]
#[command(name = "ipd-sim", about = "Iterated Prisoner's Dilemma tournaments and genetic strategy evolution")]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation to completion
    Run {
        #[command(flatten)]
        params: ParamArgs,
        /// Match mode: "Tournament" or "Match"
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        strategy_a: Option<String>,
        #[arg(long)]
        strategy_b: Option<String>,
        #[arg(long)]
        mutation_rate: Option<f64>,
        #[arg(long)]
        survivor_fraction: Option<f64>,
        /// Write the per-generation fitness trace as JSON
        #[arg(long)]
        trace_out: Option<PathBuf>,
    },
    /// Sweep mutation rate and survivor fraction, scoring each setting
    Sweep {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, value_delimiter = ',', default_values_t = sweep::MUTATION_RATES)]
        mutation_rates: Vec<f64>,
        #[arg(long, value_delimiter = ',', default_values_t = sweep::SURVIVOR_FRACTIONS)]
        survivor_fractions: Vec<f64>,
        /// Skip the combined (mutation rate, survivor fraction) grid
        #[arg(long)]
        no_grid: bool,
        /// Write the sweep results as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// List the built-in strategies
    Strategies,
}

/// Options shared by `run` and `sweep`
#[derive(Args)]
struct ParamArgs {
    /// Simulation configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Payoff table JSON
    #[arg(long)]
    payoffs: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    rounds: Option<usize>,
    #[arg(long)]
    population: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    elite_count: Option<usize>,
}

impl ParamArgs {
    /// Base configuration (file or `default`) with command line overrides
    fn load_config(&self, default: SimulationConfig) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = read(path)?;
                SimulationConfig::from_json(&json)
                    .with_context(|| format!("Failed to parse config {:?}", path))?
            }
            None => default,
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rounds) = self.rounds {
            config.rounds_per_match = rounds;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(generations) = self.generations {
            config.num_generations = generations;
        }
        if let Some(elite_count) = self.elite_count {
            config.elite_count = elite_count;
        }
        Ok(config)
    }

    fn load_payoffs(&self) -> Result<PayoffTable> {
        match &self.payoffs {
            Some(path) => {
                let json = read(path)?;
                PayoffTable::from_json(&json)
                    .with_context(|| format!("Failed to parse payoff table {:?}", path))
            }
            None => Ok(PayoffTable::default()),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!("Wrote {:?}", path);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command {
        Commands::Run {
            params,
            mode,
            strategy_a,
            strategy_b,
            mutation_rate,
            survivor_fraction,
            trace_out,
        } => {
            let mut config = params.load_config(SimulationConfig::default())?;
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(name) = strategy_a {
                config.strategy_a = name;
            }
            if let Some(name) = strategy_b {
                config.strategy_b = name;
            }
            if let Some(rate) = mutation_rate {
                config.mutation_rate = rate;
            }
            if let Some(fraction) = survivor_fraction {
                config.survivor_fraction = fraction;
            }
            let payoffs = params.load_payoffs()?;
            run(config, payoffs, trace_out.as_deref())
        }
        Commands::Sweep {
            params,
            mutation_rates,
            survivor_fractions,
            no_grid,
            report,
        } => {
            let base = params.load_config(sweep::experiment_base())?;
            let payoffs = params.load_payoffs()?;
            let results = sweep::run_sweep(
                &base,
                &mutation_rates,
                &survivor_fractions,
                !no_grid,
                |config| sweep::run_metric(config, &payoffs),
            );

            for point in results.mutation.iter().chain(&results.survivor).chain(&results.grid) {
                println!(
                    "m={:<6} s={:<6} metric={:.3}",
                    point.mutation_rate, point.survivor_fraction, point.metric
                );
            }
            if let Some(best) = results.best() {
                println!(
                    "Best: mutation rate {} survivor fraction {} ({:.3})",
                    best.mutation_rate, best.survivor_fraction, best.metric
                );
            }
            if let Some(path) = report {
                write_json(&path, &results)?;
            }
            Ok(())
        }
        Commands::Strategies => {
            for strategy in FixedStrategy::ALL {
                println!("{:<22} {}", strategy.name(), strategy.describe());
            }
            Ok(())
        }
    }
}

fn run(config: SimulationConfig, payoffs: PayoffTable, trace_out: Option<&Path>) -> Result<()> {
    let mut sim = Simulation::with_payoffs(config, payoffs);
    let steps = sim.run_to_completion();

    if sim.phase() == Phase::Error {
        let reason = sim.log().lines().last().unwrap_or("unknown error").to_string();
        bail!("Simulation failed: {}", reason);
    }
    tracing::debug!(steps, "simulation finished");

    if let Some(standings) = sim.final_standings() {
        println!("Final standings:");
        for (rank, standing) in standings.ranked().into_iter().enumerate() {
            println!("{:>3}. {:<22} {}", rank + 1, standing.name, standing.score);
        }
    }
    if let Some(outcome) = sim.match_outcome() {
        println!(
            "{} {} - {} {}",
            outcome.name_a, outcome.result.score_a, outcome.result.score_b, outcome.name_b
        );
    }
    if let Some(best) = sim.best_individual() {
        println!("Best evolved strategy: {}", best);
        println!("Mean best fitness: {:.3}", sim.mean_best_fitness());
    }

    if let Some(path) = trace_out {
        write_json(path, &sim.trace())?;
    }
    Ok(())
}
