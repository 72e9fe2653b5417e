//! Step-driven simulation controller
//!
//! A `Simulation` owns one configured run and advances it one phase (or one
//! GA generation) per `step()` call, so a UI can redraw between steps.
//!
//! ```text
//! Tournament: InitialTournament -> GeneticPhase (xN) -> FinalTournament -> Finished
//! Match:      Match -> Finished
//! any invalid configuration:      Error
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Mode, SimulationConfig};
use crate::error::ConfigError;
use crate::evolution::{evolve, generation_step, initialize_population, GenerationRecord};
use crate::game::{run_match, MatchResult};
use crate::genome::Individual;
use crate::payoff::PayoffTable;
use crate::random::{create_rng, seeded_rng, SeededRng};
use crate::strategy::{FixedStrategy, Roster, Strategy, EVOLVED_STRATEGY_NAME};
use crate::tournament::{run_tournament, Standings};

/// Where the controller is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Error,
    InitialTournament,
    GeneticPhase,
    FinalTournament,
    Match,
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Error => "error",
            Phase::InitialTournament => "initial_tournament",
            Phase::GeneticPhase => "genetic_phase",
            Phase::FinalTournament => "final_tournament",
            Phase::Match => "match",
            Phase::Finished => "finished",
        }
    }

    /// `Error` and `Finished` never advance
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Error | Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives log lines as they are produced
pub trait SimulationObserver {
    fn on_log(&mut self, line: &str);

    /// Called at the start of every reset, before any new log line
    fn on_reset(&mut self) {}
}

/// Result of a match-mode run
#[derive(Clone, Debug, Serialize)]
pub struct MatchOutcome {
    pub name_a: String,
    pub name_b: String,
    pub result: MatchResult,
}

pub struct Simulation {
    config: SimulationConfig,
    payoffs: PayoffTable,
    pending_payoffs: Option<PayoffTable>,
    rng: SeededRng,
    phase: Phase,
    current_generation: usize,
    population: Vec<Individual>,
    best: Option<(Individual, i64)>,
    trace: Vec<GenerationRecord>,
    log: String,
    initial_standings: Option<Standings>,
    final_standings: Option<Standings>,
    match_outcome: Option<MatchOutcome>,
    observer: Option<Box<dyn SimulationObserver>>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.phase)
            .field("current_generation", &self.current_generation)
            .field("population", &self.population.len())
            .field("best_fitness", &self.best_fitness())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Build a simulation with the classic payoffs and reset it
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_payoffs(config, PayoffTable::default())
    }

    pub fn with_payoffs(config: SimulationConfig, payoffs: PayoffTable) -> Self {
        let rng = create_rng(config.seed);
        let mut sim = Self {
            config,
            payoffs,
            pending_payoffs: None,
            rng,
            phase: Phase::Error,
            current_generation: 0,
            population: Vec::new(),
            best: None,
            trace: Vec::new(),
            log: String::new(),
            initial_standings: None,
            final_standings: None,
            match_outcome: None,
            observer: None,
        };
        sim.reset();
        sim
    }

    pub fn set_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration; takes effect at the next `reset`
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    /// Change one parameter; takes effect at the next `reset`
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set(key, value)
    }

    /// Payoff table in force for the current run
    pub fn payoffs(&self) -> &PayoffTable {
        &self.payoffs
    }

    /// Queue a payoff table; it replaces the active one at the next `reset`
    pub fn load_payoffs(&mut self, payoffs: PayoffTable) {
        self.pending_payoffs = Some(payoffs);
    }

    /// Discard all run state and re-read the configuration.
    ///
    /// A configured seed reseeds the generator, so resetting twice replays
    /// the same run.
    pub fn reset(&mut self) {
        if let Some(payoffs) = self.pending_payoffs.take() {
            self.payoffs = payoffs;
        }
        if let Some(seed) = self.config.seed {
            self.rng = seeded_rng(seed);
        }

        self.current_generation = 0;
        self.population.clear();
        self.best = None;
        self.trace.clear();
        self.log.clear();
        self.initial_standings = None;
        self.final_standings = None;
        self.match_outcome = None;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_reset();
        }

        match self.config.validate() {
            Ok(mode) => {
                self.phase = match mode {
                    Mode::Tournament => Phase::InitialTournament,
                    Mode::Match => Phase::Match,
                };
                self.append_log(format!("Simulation reset. Mode: {}", mode));
            }
            Err(err) => self.fail(err),
        }
    }

    /// Advance by one phase or one generation.
    ///
    /// Returns true once the run is over (finished or errored); further
    /// calls change nothing and keep returning true.
    pub fn step(&mut self) -> bool {
        match self.phase {
            Phase::Error | Phase::Finished => true,
            Phase::InitialTournament => {
                self.step_initial_tournament();
                false
            }
            Phase::GeneticPhase => {
                self.step_generation();
                false
            }
            Phase::FinalTournament => {
                self.step_final_tournament();
                true
            }
            Phase::Match => {
                self.step_match();
                true
            }
        }
    }

    /// Step until terminal; returns the number of steps taken
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 1;
        while !self.step() {
            steps += 1;
        }
        steps
    }

    fn step_initial_tournament(&mut self) {
        self.append_log("Running initial tournament among non-genetic strategies...");

        let roster = Roster::fixed();
        let standings = run_tournament(
            &roster,
            self.config.rounds_per_match,
            &self.payoffs,
            &mut self.rng,
        );
        self.log_standings(&standings);
        self.initial_standings = Some(standings);

        self.population = initialize_population(self.config.population_size, &mut self.rng);
        self.current_generation = 0;
        self.phase = Phase::GeneticPhase;
    }

    fn step_generation(&mut self) {
        let params = self.config.genetic_params();
        let opponents = Roster::fixed();
        let outcome = generation_step(
            &self.population,
            &opponents,
            &params,
            &self.payoffs,
            &mut self.rng,
        );

        let generation = self.current_generation;
        self.append_log(format!(
            "Generation {}: Best Fitness = {}",
            generation, outcome.best_fitness
        ));
        debug!(generation, mean_fitness = outcome.mean_fitness, "generation complete");
        self.trace.push(GenerationRecord {
            generation,
            best_fitness: outcome.best_fitness,
            mean_fitness: outcome.mean_fitness,
        });

        if self.best.as_ref().map_or(true, |(_, f)| outcome.best_fitness > *f) {
            self.best = Some((outcome.best, outcome.best_fitness));
        }
        self.population = outcome.population;

        if generation + 1 >= self.config.num_generations.max(1) {
            self.phase = Phase::FinalTournament;
        } else {
            self.current_generation += 1;
        }
    }

    fn step_final_tournament(&mut self) {
        let Some((best, best_fitness)) = self.best.clone() else {
            // The genetic phase always records a best before getting here.
            self.phase = Phase::Finished;
            return;
        };

        self.append_log("Running final tournament including Genetic Strategy...");

        let mut roster = Roster::fixed();
        roster.insert(EVOLVED_STRATEGY_NAME, best.as_strategy());
        let standings = run_tournament(
            &roster,
            self.config.rounds_per_match,
            &self.payoffs,
            &mut self.rng,
        );
        self.log_standings(&standings);
        self.final_standings = Some(standings);

        self.append_log(format!("Overall Best Fitness: {}", best_fitness));
        debug!(genome = %best, "best evolved individual");
        self.phase = Phase::Finished;
    }

    fn step_match(&mut self) {
        let name_a = self.config.strategy_a.clone();
        let name_b = self.config.strategy_b.clone();
        if let Err(err) = validate_match(&name_a, &name_b) {
            self.fail(err);
            return;
        }

        let opponent = if name_a == EVOLVED_STRATEGY_NAME {
            Some(('B', name_b.as_str()))
        } else if name_b == EVOLVED_STRATEGY_NAME {
            Some(('A', name_a.as_str()))
        } else {
            None
        };

        let fixed = Roster::fixed();
        let mut evolved: Option<Individual> = None;
        if let Some((slot, opponent)) = opponent {
            let opponents = match fixed.only(opponent) {
                Some(roster) => roster,
                None => {
                    self.fail(unknown_strategy(slot, opponent));
                    return;
                }
            };
            self.append_log(format!(
                "Evolving Genetic Strategy for match against {}...",
                opponent
            ));
            let outcome = evolve(
                &opponents,
                self.config.population_size,
                self.config.num_generations,
                &self.config.genetic_params(),
                &self.payoffs,
                &mut self.rng,
            );
            for record in &outcome.trace {
                self.append_log(format!(
                    "Generation {}: Best Fitness = {}",
                    record.generation, record.best_fitness
                ));
            }
            self.trace = outcome.trace;
            self.population = outcome.population;
            self.current_generation = self.trace.len().saturating_sub(1);
            self.append_log(format!(
                "Evolved Genetic Strategy with fitness {}",
                outcome.best_fitness
            ));
            self.best = Some((outcome.best.clone(), outcome.best_fitness));
            evolved = Some(outcome.best);
        }

        let mut roster = fixed;
        if let Some(individual) = evolved.as_ref() {
            roster.insert(EVOLVED_STRATEGY_NAME, individual.as_strategy());
        }
        let (strategy_a, strategy_b) = match resolve_match(&roster, &name_a, &name_b) {
            Ok(pair) => pair,
            Err(err) => {
                self.fail(err);
                return;
            }
        };

        self.append_log(format!("Running match: {} vs {}", name_a, name_b));
        let result = run_match(
            &strategy_a,
            &strategy_b,
            self.config.rounds_per_match,
            &self.payoffs,
            &mut self.rng,
        );
        self.append_log("Match Results:");
        self.append_log(format!("{}: {}", name_a, result.score_a));
        self.append_log(format!("{}: {}", name_b, result.score_b));

        self.match_outcome = Some(MatchOutcome {
            name_a,
            name_b,
            result,
        });
        self.phase = Phase::Finished;
    }

    fn log_standings(&mut self, standings: &Standings) {
        for standing in standings.iter() {
            self.append_log(format!("{}: {}", standing.name, standing.score));
        }
    }

    fn fail(&mut self, err: ConfigError) {
        self.phase = Phase::Error;
        self.append_log(err.to_string());
    }

    fn append_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "ipd::simulation", "{}", line);
        self.log.push_str(&line);
        self.log.push('\n');
        if let Some(observer) = self.observer.as_mut() {
            observer.on_log(&line);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn current_generation(&self) -> usize {
        self.current_generation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual seen so far in this run
    pub fn best_individual(&self) -> Option<&Individual> {
        self.best.as_ref().map(|(individual, _)| individual)
    }

    pub fn best_fitness(&self) -> Option<i64> {
        self.best.as_ref().map(|(_, fitness)| *fitness)
    }

    /// One record per completed generation
    pub fn trace(&self) -> &[GenerationRecord] {
        &self.trace
    }

    /// Per-generation best fitness values
    pub fn max_fitnesses(&self) -> Vec<i64> {
        self.trace.iter().map(|r| r.best_fitness).collect()
    }

    /// Mean of the per-generation best fitness; 0.0 before any generation
    pub fn mean_best_fitness(&self) -> f64 {
        if self.trace.is_empty() {
            return 0.0;
        }
        self.trace.iter().map(|r| r.best_fitness as f64).sum::<f64>() / self.trace.len() as f64
    }

    /// Accumulated log, one line per entry
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn initial_standings(&self) -> Option<&Standings> {
        self.initial_standings.as_ref()
    }

    pub fn final_standings(&self) -> Option<&Standings> {
        self.final_standings.as_ref()
    }

    pub fn match_outcome(&self) -> Option<&MatchOutcome> {
        self.match_outcome.as_ref()
    }
}

/// Names accepted in match mode: the fixed strategies plus the evolved one
pub fn valid_match_names() -> Vec<String> {
    FixedStrategy::ALL
        .iter()
        .map(|s| s.name().to_string())
        .chain(std::iter::once(EVOLVED_STRATEGY_NAME.to_string()))
        .collect()
}

fn unknown_strategy(slot: char, name: &str) -> ConfigError {
    ConfigError::UnknownStrategy {
        slot,
        name: name.to_string(),
        valid: valid_match_names(),
    }
}

fn validate_match(name_a: &str, name_b: &str) -> Result<(), ConfigError> {
    let valid = valid_match_names();
    for (slot, name) in [('A', name_a), ('B', name_b)] {
        if !valid.iter().any(|v| v == name) {
            return Err(unknown_strategy(slot, name));
        }
    }
    if name_a == EVOLVED_STRATEGY_NAME && name_b == EVOLVED_STRATEGY_NAME {
        return Err(ConfigError::BothEvolved);
    }
    Ok(())
}

/// Look up both match participants in `roster`
fn resolve_match<'g>(
    roster: &Roster<'g>,
    name_a: &str,
    name_b: &str,
) -> Result<(Strategy<'g>, Strategy<'g>), ConfigError> {
    let a = roster.get(name_a).ok_or_else(|| unknown_strategy('A', name_a))?;
    let b = roster.get(name_b).ok_or_else(|| unknown_strategy('B', name_b))?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn small_tournament() -> SimulationConfig {
        SimulationConfig {
            rounds_per_match: 10,
            population_size: 4,
            num_generations: 1,
            survivor_fraction: 0.5,
            elite_count: 1,
            seed: Some(42),
            ..Default::default()
        }
    }

    fn match_config(a: &str, b: &str, rounds: usize) -> SimulationConfig {
        SimulationConfig {
            mode: "Match".into(),
            rounds_per_match: rounds,
            population_size: 6,
            num_generations: 3,
            survivor_fraction: 0.5,
            elite_count: 1,
            strategy_a: a.into(),
            strategy_b: b.into(),
            seed: Some(7),
            ..Default::default()
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        lines: Rc<RefCell<Vec<String>>>,
        resets: Rc<RefCell<usize>>,
    }

    impl SimulationObserver for Recorder {
        fn on_log(&mut self, line: &str) {
            self.lines.borrow_mut().push(line.to_string());
        }

        fn on_reset(&mut self) {
            *self.resets.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_tournament_walks_every_phase() {
        let mut sim = Simulation::new(small_tournament());
        assert_eq!(sim.phase(), Phase::InitialTournament);

        assert!(!sim.step());
        assert_eq!(sim.phase(), Phase::GeneticPhase);
        assert_eq!(sim.initial_standings().unwrap().len(), 10);
        assert_eq!(sim.population().len(), 4);

        assert!(!sim.step());
        assert_eq!(sim.phase(), Phase::FinalTournament);
        assert_eq!(sim.trace().len(), 1);

        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Finished);

        let standings = sim.final_standings().unwrap();
        assert_eq!(standings.len(), 11);
        assert!(standings.score(EVOLVED_STRATEGY_NAME).is_some());
        assert!(sim.log().contains("Overall Best Fitness: "));

        // Terminal phases are sticky
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Finished);
    }

    #[test]
    fn test_generation_count_and_best_ever() {
        let mut sim = Simulation::new(SimulationConfig {
            num_generations: 5,
            ..small_tournament()
        });
        assert_eq!(sim.run_to_completion(), 7);
        assert_eq!(sim.trace().len(), 5);
        assert_eq!(sim.current_generation(), 4);

        let max = sim.max_fitnesses().into_iter().max().unwrap();
        assert_eq!(sim.best_fitness(), Some(max));
        assert!(sim.log().contains("Generation 4: Best Fitness = "));
    }

    #[test]
    fn test_zero_generations_still_evolves_once() {
        let mut sim = Simulation::new(SimulationConfig {
            num_generations: 0,
            ..small_tournament()
        });
        sim.run_to_completion();
        assert_eq!(sim.trace().len(), 1);
        assert_eq!(sim.final_standings().unwrap().len(), 11);
    }

    #[test]
    fn test_invalid_mode_errors_at_reset() {
        let mut sim = Simulation::new(SimulationConfig {
            mode: "League".into(),
            ..small_tournament()
        });
        assert_eq!(sim.phase(), Phase::Error);
        assert!(sim.log().contains("Invalid mode value 'League'. Use 'Tournament' or 'Match'."));
        assert!(sim.step());
        assert!(sim.initial_standings().is_none());
    }

    #[test]
    fn test_fixed_match() {
        let mut sim = Simulation::new(match_config("Tit for Tat", "Always Defect", 4));
        assert_eq!(sim.phase(), Phase::Match);
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Finished);

        let outcome = sim.match_outcome().unwrap();
        assert_eq!(outcome.result.score_a, 3);
        assert_eq!(outcome.result.score_b, 8);
        assert!(sim.trace().is_empty());
        assert!(sim.log().contains("Running match: Tit for Tat vs Always Defect"));
        assert!(sim.log().contains("Tit for Tat: 3\nAlways Defect: 8\n"));
    }

    #[test]
    fn test_unknown_match_strategy() {
        let mut sim = Simulation::new(match_config("Tit for Tat", "Nope", 4));
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Error);
        assert!(sim.log().contains("Strategy B 'Nope' is invalid. Valid options: "));
        assert!(sim.match_outcome().is_none());
    }

    #[test]
    fn test_both_evolved_is_rejected() {
        let mut sim = Simulation::new(match_config(
            EVOLVED_STRATEGY_NAME,
            EVOLVED_STRATEGY_NAME,
            4,
        ));
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Error);
        assert!(sim.log().contains("Both strategies cannot be 'Genetic Strategy'."));
    }

    #[test]
    fn test_evolved_match() {
        let mut sim = Simulation::new(match_config(EVOLVED_STRATEGY_NAME, "Always Cooperate", 5));
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Finished);
        assert_eq!(sim.trace().len(), 3);
        assert!(sim.best_individual().is_some());
        assert!(sim.log().contains("Evolving Genetic Strategy for match against Always Cooperate..."));
        assert!(sim.log().contains("Evolved Genetic Strategy with fitness "));

        let outcome = sim.match_outcome().unwrap();
        assert_eq!(outcome.name_a, EVOLVED_STRATEGY_NAME);
        assert_eq!(outcome.result.round_count(), 5);
    }

    #[test]
    fn test_evolved_match_as_player_b() {
        let mut sim = Simulation::new(match_config("Always Cooperate", EVOLVED_STRATEGY_NAME, 5));
        assert!(sim.step());
        assert_eq!(sim.phase(), Phase::Finished);
        assert_eq!(sim.trace().len(), 3);
        assert!(sim.log().contains("Evolving Genetic Strategy for match against Always Cooperate..."));
        assert_eq!(sim.log().matches("Generation 2: Best Fitness = ").count(), 1);

        let outcome = sim.match_outcome().unwrap();
        assert_eq!(outcome.name_a, "Always Cooperate");
        assert_eq!(outcome.name_b, EVOLVED_STRATEGY_NAME);
        assert_eq!(outcome.result.round_count(), 5);
    }

    #[test]
    fn test_resolve_match_reports_missing_participant() {
        let roster = Roster::fixed();
        let (a, b) = resolve_match(&roster, "Prober", "Tit for Tat").unwrap();
        assert_eq!(a, Strategy::Fixed(FixedStrategy::Prober));
        assert_eq!(b, Strategy::Fixed(FixedStrategy::TitForTat));

        // The evolved entry only exists once an individual has been evolved
        let err = resolve_match(&roster, EVOLVED_STRATEGY_NAME, "Prober").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy { slot: 'A', .. }));
        let err = resolve_match(&roster, "Prober", "Nobody").unwrap_err();
        assert_eq!(
            err.to_string().split(". ").next(),
            Some("Strategy B 'Nobody' is invalid")
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut sim = Simulation::new(SimulationConfig {
                num_generations: 3,
                ..small_tournament()
            });
            sim.run_to_completion();
            (sim.log().to_string(), sim.max_fitnesses())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_reset_replays_with_seed() {
        let mut sim = Simulation::new(small_tournament());
        sim.run_to_completion();
        let first = sim.log().to_string();

        sim.reset();
        assert_eq!(sim.phase(), Phase::InitialTournament);
        assert!(sim.trace().is_empty());
        assert!(sim.final_standings().is_none());
        sim.run_to_completion();
        assert_eq!(sim.log(), first);
    }

    #[test]
    fn test_payoffs_change_only_at_reset() {
        let mut sim = Simulation::new(match_config("Always Cooperate", "Always Cooperate", 2));
        let generous = PayoffTable {
            cooperate_cooperate: (4, 4),
            ..Default::default()
        };
        sim.load_payoffs(generous);
        assert_eq!(sim.payoffs(), &PayoffTable::default());

        sim.reset();
        assert_eq!(sim.payoffs(), &generous);
        sim.step();
        assert_eq!(sim.match_outcome().unwrap().result.score_a, 8);
    }

    #[test]
    fn test_config_changes_apply_at_reset() {
        let mut sim = Simulation::new(small_tournament());
        sim.set_param("mode", "Match").unwrap();
        assert_eq!(sim.phase(), Phase::InitialTournament);
        sim.reset();
        assert_eq!(sim.phase(), Phase::Match);
    }

    #[test]
    fn test_observer_sees_every_line() {
        let recorder = Recorder::default();
        let mut sim = Simulation::new(match_config("Prober", "Win-Stay Lose-Shift", 6));
        sim.set_observer(Box::new(recorder.clone()));
        sim.reset();
        sim.step();

        let lines = recorder.lines.borrow();
        assert_eq!(*recorder.resets.borrow(), 1);
        assert_eq!(lines.first().map(String::as_str), Some("Simulation reset. Mode: Match"));
        assert_eq!(lines.join("\n") + "\n", sim.log());
    }

    #[test]
    fn test_mean_best_fitness() {
        let mut sim = Simulation::new(SimulationConfig {
            num_generations: 2,
            ..small_tournament()
        });
        assert_eq!(sim.mean_best_fitness(), 0.0);
        sim.run_to_completion();

        let values = sim.max_fitnesses();
        let expected = values.iter().sum::<i64>() as f64 / values.len() as f64;
        assert!((sim.mean_best_fitness() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::InitialTournament.to_string(), "initial_tournament");
        assert_eq!(Phase::GeneticPhase.as_str(), "genetic_phase");
        assert!(Phase::Error.is_terminal());
        assert!(!Phase::Match.is_terminal());
    }
}
