//! WASM bindings for a browser front end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{run_match, seeded_rng, FixedStrategy, PayoffTable, Simulation, SimulationConfig, Strategy};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn parse_fixed(slot: &str, name: &str) -> Result<FixedStrategy, JsError> {
    FixedStrategy::from_name(name)
        .ok_or_else(|| JsError::new(&format!("Invalid strategy {}: {}", slot, name)))
}

/// Step-driven simulation handle
#[wasm_bindgen]
pub struct WasmSimulation {
    inner: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create from a JSON configuration; missing keys take defaults.
    ///
    /// Without a `seed` the run is seeded from `Math.random()`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSimulation, JsError> {
        let mut config = SimulationConfig::from_json(config_json)
            .map_err(|e| JsError::new(&e.to_string()))?;
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * (1u64 << 53) as f64) as u64);
        }
        Ok(Self {
            inner: Simulation::new(config),
        })
    }

    /// Change one parameter; applied at the next `reset`
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), JsError> {
        self.inner
            .set_param(key, value)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Queue a payoff table (JSON); applied at the next `reset`
    pub fn set_payoffs(&mut self, payoffs_json: &str) -> Result<(), JsError> {
        let payoffs = PayoffTable::from_json(payoffs_json)
            .map_err(|e| JsError::new(&format!("Invalid payoff table: {}", e)))?;
        self.inner.load_payoffs(payoffs);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Advance once; true when the run is over
    pub fn step(&mut self) -> bool {
        self.inner.step()
    }

    pub fn phase(&self) -> String {
        self.inner.phase().to_string()
    }

    pub fn generation(&self) -> usize {
        self.inner.current_generation()
    }

    pub fn log(&self) -> String {
        self.inner.log().to_string()
    }

    /// Per-generation records: `[{generation, best_fitness, mean_fitness}]`
    pub fn trace(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.trace())
    }

    pub fn best_individual(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.best_individual())
    }

    pub fn initial_standings(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.initial_standings())
    }

    pub fn final_standings(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.final_standings())
    }

    pub fn match_outcome(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.match_outcome())
    }
}

/// Replay a match between two fixed strategies with round-by-round details
///
/// # Arguments
/// * `strategy_a` - Display name of player A's strategy
/// * `strategy_b` - Display name of player B's strategy
/// * `rounds` - Number of rounds
/// * `seed` - Seed for the randomized strategies
///
/// # Returns
/// Array of round results with running totals
#[wasm_bindgen]
pub fn replay_match(
    strategy_a: &str,
    strategy_b: &str,
    rounds: usize,
    seed: u64,
) -> Result<JsValue, JsError> {
    let a: Strategy<'static> = parse_fixed("A", strategy_a)?.into();
    let b: Strategy<'static> = parse_fixed("B", strategy_b)?.into();
    let payoffs = PayoffTable::default();

    let result = run_match(&a, &b, rounds, &payoffs, &mut seeded_rng(seed));

    to_js(&result.rounds(&payoffs))
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(name: &str) -> Result<String, JsError> {
    Ok(parse_fixed("", name)?.describe().to_string())
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: String,
    name: String,
    description: String,
}

/// Get all fixed strategies
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = FixedStrategy::ALL
        .iter()
        .map(|s| StrategyInfo {
            id: format!("{:?}", s),
            name: s.name().to_string(),
            description: s.describe().to_string(),
        })
        .collect();

    to_js(&types)
}
