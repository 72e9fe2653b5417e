//! Iterated Prisoner's Dilemma engine
//!
//! Ten fixed strategies, round-robin tournaments, and a genetic algorithm
//! that evolves lookup-table strategies (a three-move opening plus one
//! response per combination of the last three moves on each side).
//! `Simulation` drives a whole run one step at a time.
//!
//! This crate is compiled to:
//! - Native (for the `ipd-sim` command line driver and experiments)
//! - WASM (for a browser front end, behind the `wasm` feature)

mod random;
mod payoff;
mod strategy;
mod genome;
mod game;
mod tournament;
mod fitness;
mod selection;
mod evolution;
mod error;
mod config;
mod simulation;

#[cfg(feature = "wasm")]
mod wasm;

pub use random::{create_rng, seeded_rng, SeededRng};
pub use payoff::{Payoff, PayoffTable};
pub use strategy::{FixedStrategy, Move, Roster, Strategy, EVOLVED_STRATEGY_NAME};
pub use genome::{
    crossover, mutate, HistoryKey, Individual, RuleTable, RuleTableLenError, MEMORY, RULE_COUNT,
};
pub use game::{run_match, MatchResult, RoundResult};
pub use tournament::{calculate_match_count, run_tournament, Standing, Standings};
pub use fitness::{evaluate_individual, evaluate_population};
pub use selection::{select_survivors, survivor_count};
pub use evolution::{
    evolve, evolve_with_callback, generation_step, initialize_population, EvolutionOutcome,
    GenerationOutcome, GenerationRecord, GeneticParams,
};
pub use error::ConfigError;
pub use config::{Mode, SimulationConfig};
pub use simulation::{valid_match_names, MatchOutcome, Phase, Simulation, SimulationObserver};
