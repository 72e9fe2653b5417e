//! Simulation configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evolution::GeneticParams;

/// What a simulation run does
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Initial tournament, GA generations, final tournament with the winner
    Tournament,
    /// One match between two named strategies (evolving one if requested)
    Match,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Tournament => write!(f, "Tournament"),
            Mode::Match => write!(f, "Match"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tournament" => Ok(Mode::Tournament),
            "Match" => Ok(Mode::Match),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Parameters read at every `Simulation::reset`.
///
/// `mode` stays a plain string so a driver can hand over whatever the user
/// typed; it is checked at reset time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub mode: String,
    pub rounds_per_match: usize,
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub survivor_fraction: f64,
    pub elite_count: usize,
    #[serde(alias = "strategy_A")]
    pub strategy_a: String,
    #[serde(alias = "strategy_B")]
    pub strategy_b: String,
    /// Fixed seed for reproducible runs; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Tournament.to_string(),
            rounds_per_match: 200,
            population_size: 100,
            num_generations: 50,
            mutation_rate: 0.1,
            survivor_fraction: 0.7,
            elite_count: 2,
            strategy_a: "Tit for Tat".to_string(),
            strategy_b: "Always Defect".to_string(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply one `key = value` pair, as typed into a parameter form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();

        match key {
            "mode" => self.mode = value.to_string(),
            "rounds_per_match" => self.rounds_per_match = value.parse().map_err(|_| invalid())?,
            "population_size" => self.population_size = value.parse().map_err(|_| invalid())?,
            "num_generations" => self.num_generations = value.parse().map_err(|_| invalid())?,
            "mutation_rate" => self.mutation_rate = value.parse().map_err(|_| invalid())?,
            "survivor_fraction" => self.survivor_fraction = value.parse().map_err(|_| invalid())?,
            "elite_count" => self.elite_count = value.parse().map_err(|_| invalid())?,
            "strategy_a" | "strategy_A" => self.strategy_a = value.to_string(),
            "strategy_b" | "strategy_B" => self.strategy_b = value.to_string(),
            "seed" => {
                self.seed = match value {
                    "" | "none" => None,
                    v => Some(v.parse().map_err(|_| invalid())?),
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Check mode and numeric ranges
    pub fn validate(&self) -> Result<Mode, ConfigError> {
        let mode: Mode = self.mode.parse()?;

        if self.population_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "population_size",
                value: self.population_size.to_string(),
                reason: "must be greater than 0",
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidParameter {
                name: "mutation_rate",
                value: self.mutation_rate.to_string(),
                reason: "must lie in [0, 1]",
            });
        }
        if !(self.survivor_fraction > 0.0 && self.survivor_fraction <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "survivor_fraction",
                value: self.survivor_fraction.to_string(),
                reason: "must lie in (0, 1]",
            });
        }

        Ok(mode)
    }

    pub fn genetic_params(&self) -> GeneticParams {
        GeneticParams {
            rounds: self.rounds_per_match,
            mutation_rate: self.mutation_rate,
            survivor_fraction: self.survivor_fraction,
            elite_count: self.elite_count,
        }
    }
}
