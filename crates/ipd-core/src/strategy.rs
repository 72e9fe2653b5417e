//! Strategy definitions and execution

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::Individual;
use crate::payoff::PayoffTable;

/// Roster key reserved for the evolved strategy.
pub const EVOLVED_STRATEGY_NAME: &str = "Genetic Strategy";

/// Cooperation probability of Generous Tit-for-Tat after a defection.
const GENEROSITY: f64 = 0.7;

/// Window and threshold used by Adaptive Ratio.
const ADAPTIVE_WINDOW: usize = 5;
const ADAPTIVE_THRESHOLD: (usize, usize) = (3, 5); // 0.6 as a fraction

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    /// Single-letter form used in logs: `C` or `D`
    pub fn symbol(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }
}

/// Built-in, non-adaptive strategy type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedStrategy {
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Win-stay, lose-shift. Repeat move if good outcome.
    WinStayLoseShift,
    /// Fair coin each round.
    Random,
    /// Tit-for-Tat that forgives a defection 70% of the time.
    GenerousTitForTat,
    /// Two cooperations, two defections, repeat.
    DoubleAlternator,
    /// Cooperate four rounds, probe with a defection, then judge the reply.
    Prober,
    /// Cooperate while the opponent's recent cooperation ratio is high.
    AdaptiveRatio,
}

impl FixedStrategy {
    /// Every fixed strategy, in roster order
    pub const ALL: [FixedStrategy; 10] = [
        FixedStrategy::AlwaysCooperate,
        FixedStrategy::AlwaysDefect,
        FixedStrategy::TitForTat,
        FixedStrategy::GrimTrigger,
        FixedStrategy::WinStayLoseShift,
        FixedStrategy::Random,
        FixedStrategy::GenerousTitForTat,
        FixedStrategy::DoubleAlternator,
        FixedStrategy::Prober,
        FixedStrategy::AdaptiveRatio,
    ];

    /// Display name, also used as the roster key
    pub fn name(self) -> &'static str {
        match self {
            FixedStrategy::AlwaysCooperate => "Always Cooperate",
            FixedStrategy::AlwaysDefect => "Always Defect",
            FixedStrategy::TitForTat => "Tit for Tat",
            FixedStrategy::GrimTrigger => "Grim Trigger",
            FixedStrategy::WinStayLoseShift => "Win-Stay Lose-Shift",
            FixedStrategy::Random => "Random Strategy",
            FixedStrategy::GenerousTitForTat => "Generous Tit-for-Tat",
            FixedStrategy::DoubleAlternator => "Double Alternator",
            FixedStrategy::Prober => "Prober",
            FixedStrategy::AdaptiveRatio => "Adaptive Ratio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Get a human-readable description of a strategy
    pub fn describe(self) -> &'static str {
        match self {
            FixedStrategy::AlwaysCooperate => "Never defects. Always cooperates.",
            FixedStrategy::AlwaysDefect => "Never cooperates. Always defects.",
            FixedStrategy::TitForTat => "Copies opponent's last move. Starts by cooperating.",
            FixedStrategy::GrimTrigger => "Cooperates until betrayed, then always defects.",
            FixedStrategy::WinStayLoseShift => "Repeats move if it scored at least 3, switches otherwise.",
            FixedStrategy::Random => "Randomly cooperates or defects each round.",
            FixedStrategy::GenerousTitForTat => "Like Tit for Tat, but forgives a defection 70% of the time.",
            FixedStrategy::DoubleAlternator => "Cooperates twice, defects twice, and repeats.",
            FixedStrategy::Prober => "Cooperates four rounds, defects once, then defects forever if punished or plays Tit for Tat.",
            FixedStrategy::AdaptiveRatio => "Cooperates if the opponent cooperated in at least 60% of its last five moves.",
        }
    }

    /// Execute the strategy for one round
    ///
    /// # Arguments
    /// * `my_history` - Our past moves
    /// * `opponent_history` - Opponent's past moves
    /// * `payoffs` - Active payoff table (Win-Stay Lose-Shift scores its last round)
    /// * `rng` - Random source for the randomized strategies
    pub fn respond<R: Rng + ?Sized>(
        self,
        my_history: &[Move],
        opponent_history: &[Move],
        payoffs: &PayoffTable,
        rng: &mut R,
    ) -> Move {
        match self {
            FixedStrategy::AlwaysCooperate => Move::Cooperate,
            FixedStrategy::AlwaysDefect => Move::Defect,
            FixedStrategy::TitForTat => execute_tit_for_tat(opponent_history),
            FixedStrategy::GrimTrigger => execute_grim_trigger(opponent_history),
            FixedStrategy::WinStayLoseShift => {
                execute_win_stay_lose_shift(my_history, opponent_history, payoffs)
            }
            FixedStrategy::Random => execute_random(rng),
            FixedStrategy::GenerousTitForTat => {
                execute_generous_tit_for_tat(opponent_history, rng)
            }
            FixedStrategy::DoubleAlternator => execute_double_alternator(my_history),
            FixedStrategy::Prober => execute_prober(my_history, opponent_history),
            FixedStrategy::AdaptiveRatio => execute_adaptive_ratio(opponent_history),
        }
    }
}

/// Tit-for-Tat: Copy opponent's last move, start with cooperate
fn execute_tit_for_tat(opponent_history: &[Move]) -> Move {
    opponent_history.last().copied().unwrap_or(Move::Cooperate)
}

/// Grim Trigger: Cooperate until opponent defects, then always defect
fn execute_grim_trigger(opponent_history: &[Move]) -> Move {
    if opponent_history.contains(&Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Win-Stay Lose-Shift
/// - If last round paid us 3+ points, repeat move
/// - Otherwise switch move
fn execute_win_stay_lose_shift(
    my_history: &[Move],
    opponent_history: &[Move],
    payoffs: &PayoffTable,
) -> Move {
    let (Some(&my_last), Some(&opp_last)) = (my_history.last(), opponent_history.last()) else {
        return Move::Cooperate; // Start with cooperate
    };

    let (my_score, _) = payoffs.payoff(my_last, opp_last);
    if my_score >= 3 {
        my_last
    } else {
        my_last.flip()
    }
}

fn execute_random<R: Rng + ?Sized>(rng: &mut R) -> Move {
    if rng.gen::<bool>() {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Generous Tit-for-Tat: TFT, but a defection is forgiven with 70% chance
fn execute_generous_tit_for_tat<R: Rng + ?Sized>(opponent_history: &[Move], rng: &mut R) -> Move {
    match opponent_history.last() {
        None | Some(Move::Cooperate) => Move::Cooperate,
        Some(Move::Defect) => {
            if rng.gen::<f64>() < GENEROSITY {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
    }
}

/// Double Alternator: C, C, D, D, C, C, ... by our own round count
fn execute_double_alternator(my_history: &[Move]) -> Move {
    match my_history.len() % 4 {
        0 | 1 => Move::Cooperate,
        _ => Move::Defect,
    }
}

/// Prober: cooperate for rounds 0-3, defect on round 4.
/// If the opponent defected on round 4 too, defect for the rest of the
/// match; otherwise fall back to Tit-for-Tat.
fn execute_prober(my_history: &[Move], opponent_history: &[Move]) -> Move {
    match my_history.len() {
        0..=3 => Move::Cooperate,
        4 => Move::Defect,
        _ => {
            if opponent_history.get(4) == Some(&Move::Defect) {
                Move::Defect
            } else {
                execute_tit_for_tat(opponent_history)
            }
        }
    }
}

/// Adaptive Ratio: cooperate while the opponent cooperated in at least 60%
/// of its last five moves (or of all its moves, if fewer)
fn execute_adaptive_ratio(opponent_history: &[Move]) -> Move {
    let start = opponent_history.len().saturating_sub(ADAPTIVE_WINDOW);
    let recent = &opponent_history[start..];
    if recent.is_empty() {
        return Move::Cooperate;
    }

    let cooperations = recent.iter().filter(|m| **m == Move::Cooperate).count();
    let (num, den) = ADAPTIVE_THRESHOLD;
    if cooperations * den >= recent.len() * num {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// A playable strategy: either a built-in rule or an evolved genome.
///
/// Evolved strategies borrow their `Individual`, so a roster can never
/// outlive the population entry it plays for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy<'g> {
    Fixed(FixedStrategy),
    Evolved(&'g Individual),
}

impl<'g> Strategy<'g> {
    /// Next move given both histories (own first)
    pub fn respond<R: Rng + ?Sized>(
        &self,
        my_history: &[Move],
        opponent_history: &[Move],
        payoffs: &PayoffTable,
        rng: &mut R,
    ) -> Move {
        match self {
            Strategy::Fixed(fixed) => fixed.respond(my_history, opponent_history, payoffs, rng),
            Strategy::Evolved(individual) => individual.respond(my_history, opponent_history),
        }
    }
}

impl<'g> From<FixedStrategy> for Strategy<'g> {
    fn from(fixed: FixedStrategy) -> Self {
        Strategy::Fixed(fixed)
    }
}

/// Insertion-ordered mapping from names to strategies.
///
/// Iteration order is insertion order; tournaments and fitness evaluation
/// consume randomness in this order.
#[derive(Clone, Debug, Default)]
pub struct Roster<'g> {
    entries: Vec<(String, Strategy<'g>)>,
}

impl<'g> Roster<'g> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The ten built-in strategies
    pub fn fixed() -> Self {
        let mut roster = Self::new();
        for fixed in FixedStrategy::ALL {
            roster.insert(fixed.name(), Strategy::Fixed(fixed));
        }
        roster
    }

    /// Add a strategy, replacing any existing entry with the same name
    pub fn insert(&mut self, name: impl Into<String>, strategy: Strategy<'g>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = strategy,
            None => self.entries.push((name, strategy)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Strategy<'g>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A roster holding only `name`, if present
    pub fn only(&self, name: &str) -> Option<Self> {
        let strategy = self.get(name)?;
        let mut roster = Self::new();
        roster.insert(name, strategy);
        Some(roster)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Strategy<'g>)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
