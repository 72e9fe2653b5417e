//! Payoff matrix for the Prisoner's Dilemma

use serde::{Deserialize, Serialize};

use crate::strategy::Move;

/// Payoff pair for one outcome: (score_a, score_b)
pub type Payoff = (i32, i32);

/// Payoff table covering all four ordered outcomes.
///
/// Every field is always present, so lookups are total. The table is
/// swapped as a whole (see `Simulation::load_payoffs`), never patched
/// entry by entry while a match is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTable {
    pub cooperate_cooperate: Payoff,
    pub cooperate_defect: Payoff,
    pub defect_cooperate: Payoff,
    pub defect_defect: Payoff,
}

impl PayoffTable {
    /// Returns (score_a, score_b) for the ordered pair of moves
    pub fn payoff(&self, a: Move, b: Move) -> Payoff {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => self.cooperate_cooperate,
            (Move::Cooperate, Move::Defect) => self.cooperate_defect,
            (Move::Defect, Move::Cooperate) => self.defect_cooperate,
            (Move::Defect, Move::Defect) => self.defect_defect,
        }
    }

    /// Parse a table from JSON, e.g. as saved by a payoff editor
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // A struct of integer tuples always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self {
            cooperate_cooperate: (3, 3),
            cooperate_defect: (0, 5),
            defect_cooperate: (5, 0),
            defect_defect: (1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_matrix() {
        let table = PayoffTable::default();
        assert_eq!(table.payoff(Move::Cooperate, Move::Cooperate), (3, 3));
        assert_eq!(table.payoff(Move::Cooperate, Move::Defect), (0, 5));
        assert_eq!(table.payoff(Move::Defect, Move::Cooperate), (5, 0));
        assert_eq!(table.payoff(Move::Defect, Move::Defect), (1, 1));
    }

    #[test]
    fn test_json_roundtrip_keeps_custom_values() {
        let table = PayoffTable {
            cooperate_cooperate: (4, 4),
            cooperate_defect: (-1, 6),
            defect_cooperate: (6, -1),
            defect_defect: (0, 0),
        };
        let parsed = PayoffTable::from_json(&table.to_json()).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.payoff(Move::Cooperate, Move::Defect), (-1, 6));
    }

    #[test]
    fn test_incomplete_table_is_rejected() {
        let json = r#"{"cooperate_cooperate": [3, 3], "defect_defect": [1, 1]}"#;
        assert!(PayoffTable::from_json(json).is_err());
    }
}
