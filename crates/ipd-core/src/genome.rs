//! Evolvable strategy genome
//!
//! An individual is a fixed 3-move opening plus a rule table that maps the
//! last three moves of both players to the next move. With two symbols over
//! three positions per side there are 2^3 × 2^3 = 64 rules, stored densely
//! so a table can never be missing a key.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strategy::{Move, Strategy};

/// Moves in the opening, and moves of each side a rule looks back on
pub const MEMORY: usize = 3;

/// Number of rules: one per (own, opponent) 3-move history pair
pub const RULE_COUNT: usize = 1 << (2 * MEMORY);

const SIDE_COUNT: usize = 1 << MEMORY;

/// The last three moves of each side, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryKey {
    pub own: [Move; MEMORY],
    pub opponent: [Move; MEMORY],
}

impl HistoryKey {
    /// Key for the current position, or `None` before three moves per side
    pub fn from_histories(own: &[Move], opponent: &[Move]) -> Option<Self> {
        Some(Self {
            own: last_three(own)?,
            opponent: last_three(opponent)?,
        })
    }

    /// Dense index: own history is the high 3 bits, Cooperate = 0, Defect = 1,
    /// oldest move most significant
    pub fn index(&self) -> usize {
        encode(&self.own) * SIDE_COUNT + encode(&self.opponent)
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < RULE_COUNT);
        Self {
            own: decode(index / SIDE_COUNT),
            opponent: decode(index % SIDE_COUNT),
        }
    }

    /// All 64 keys, own-major in binary order
    pub fn all() -> impl Iterator<Item = HistoryKey> {
        (0..RULE_COUNT).map(Self::from_index)
    }
}

fn last_three(history: &[Move]) -> Option<[Move; MEMORY]> {
    let start = history.len().checked_sub(MEMORY)?;
    history[start..].try_into().ok()
}

fn encode(moves: &[Move; MEMORY]) -> usize {
    moves.iter().fold(0, |bits, m| (bits << 1) | (*m == Move::Defect) as usize)
}

fn decode(bits: usize) -> [Move; MEMORY] {
    let mut moves = [Move::Cooperate; MEMORY];
    for (j, slot) in moves.iter_mut().enumerate() {
        if (bits >> (MEMORY - j - 1)) & 1 == 1 {
            *slot = Move::Defect;
        }
    }
    moves
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("rule table needs 64 entries, got {0}")]
pub struct RuleTableLenError(pub usize);

/// Fully populated history → move table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Move>", into = "Vec<Move>")]
pub struct RuleTable {
    rules: [Move; RULE_COUNT],
}

impl RuleTable {
    pub fn filled(response: Move) -> Self {
        Self { rules: [response; RULE_COUNT] }
    }

    pub fn get(&self, key: HistoryKey) -> Move {
        self.rules[key.index()]
    }

    pub fn set(&mut self, key: HistoryKey, response: Move) {
        self.rules[key.index()] = response;
    }

    pub fn iter(&self) -> impl Iterator<Item = (HistoryKey, Move)> + '_ {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, m)| (HistoryKey::from_index(i), *m))
    }

    pub fn keys(&self) -> impl Iterator<Item = HistoryKey> {
        HistoryKey::all()
    }

    pub fn len(&self) -> usize {
        RULE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<Move>> for RuleTable {
    type Error = RuleTableLenError;

    fn try_from(rules: Vec<Move>) -> Result<Self, Self::Error> {
        let len = rules.len();
        let rules: [Move; RULE_COUNT] = rules.try_into().map_err(|_| RuleTableLenError(len))?;
        Ok(Self { rules })
    }
}

impl From<RuleTable> for Vec<Move> {
    fn from(table: RuleTable) -> Self {
        table.rules.to_vec()
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.rules.iter().map(|m| m.symbol()).collect();
        f.debug_tuple("RuleTable").field(&symbols).finish()
    }
}

/// Evolved strategy representation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub opening: [Move; MEMORY],
    pub rule_table: RuleTable,
}

impl Individual {
    /// Uniformly random opening and rules.
    ///
    /// Draw order: the three opening moves, then the rules in key order.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut opening = [Move::Cooperate; MEMORY];
        for slot in opening.iter_mut() {
            *slot = random_move(rng);
        }

        let mut rule_table = RuleTable::filled(Move::Cooperate);
        for key in HistoryKey::all() {
            rule_table.set(key, random_move(rng));
        }

        Self { opening, rule_table }
    }

    /// Individual that always plays `response`
    pub fn uniform(response: Move) -> Self {
        Self {
            opening: [response; MEMORY],
            rule_table: RuleTable::filled(response),
        }
    }

    /// Opening move for the first three rounds, then the rule for the
    /// last three moves of each side. A position with no matching rule
    /// (uneven histories) cooperates.
    pub fn respond(&self, my_history: &[Move], opponent_history: &[Move]) -> Move {
        if let Some(opening) = self.opening.get(my_history.len()) {
            return *opening;
        }

        HistoryKey::from_histories(my_history, opponent_history)
            .map(|key| self.rule_table.get(key))
            .unwrap_or(Move::Cooperate)
    }

    pub fn as_strategy(&self) -> Strategy<'_> {
        Strategy::Evolved(self)
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opening: String = self.opening.iter().map(|m| m.symbol()).collect();
        let rules: String = self.rule_table.rules.iter().map(|m| m.symbol()).collect();
        write!(f, "opening={} rules={}", opening, rules)
    }
}

fn random_move<R: Rng + ?Sized>(rng: &mut R) -> Move {
    if rng.gen::<bool>() {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Uniform crossover: every opening move and every rule is taken from
/// either parent with equal probability. The child owns fresh storage.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &Individual,
    parent_b: &Individual,
    rng: &mut R,
) -> Individual {
    let mut child = parent_a.clone();

    for (slot, other) in child.opening.iter_mut().zip(parent_b.opening.iter()) {
        if rng.gen::<bool>() {
            *slot = *other;
        }
    }

    for (slot, other) in child.rule_table.rules.iter_mut().zip(parent_b.rule_table.rules.iter()) {
        if rng.gen::<bool>() {
            *slot = *other;
        }
    }

    child
}

/// Flip each opening move and each rule independently with probability
/// `mutation_rate`. Returns a new individual; the input is left untouched.
///
/// A rate of 0 never flips and a rate of 1 flips every gene.
pub fn mutate<R: Rng + ?Sized>(
    individual: &Individual,
    mutation_rate: f64,
    rng: &mut R,
) -> Individual {
    let mut child = individual.clone();

    let genes = child.opening.iter_mut().chain(child.rule_table.rules.iter_mut());
    for gene in genes {
        if rng.gen::<f64>() < mutation_rate {
            *gene = gene.flip();
        }
    }

    child
}
