//! Roll outcomes, per die and for the whole pool.

use serde::{Deserialize, Serialize};

use super::{Die, DieId};

/// What a single die showed on a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieOutcome {
    /// The die that was rolled.
    pub id: DieId,
    /// Face shown, in `1..=sides`.
    pub value: u32,
    /// Whether the face was a winning face.
    pub win: bool,
}

impl DieOutcome {
    /// Outcome of `die` showing `value`, with the win flag derived from the die.
    pub fn of(die: &Die, value: u32) -> Self {
        Self {
            id: die.id,
            value,
            win: die.is_win(value),
        }
    }
}

/// The result of rolling every die in the pool once.
///
/// Replaced wholesale on each roll; order matches the pool order at roll time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollResult {
    /// Individual die outcomes.
    pub dice: Vec<DieOutcome>,
}

impl RollResult {
    /// Wrap a list of outcomes.
    pub fn new(dice: Vec<DieOutcome>) -> Self {
        Self { dice }
    }

    /// Build a result from fixed face values, one per die, in pool order.
    ///
    /// Extra values or dice are ignored. Used for scripted rolls.
    pub fn from_values(dice: &[Die], values: &[u32]) -> Self {
        Self {
            dice: dice
                .iter()
                .zip(values)
                .map(|(die, &value)| DieOutcome::of(die, value))
                .collect(),
        }
    }

    /// Number of dice that won.
    pub fn successes(&self) -> u32 {
        self.dice.iter().filter(|d| d.win).count() as u32
    }

    /// True when no die won.
    pub fn is_bust(&self) -> bool {
        self.successes() == 0
    }

    /// Outcome for a specific die, if it took part in the roll.
    pub fn outcome_for(&self, id: DieId) -> Option<&DieOutcome> {
        self.dice.iter().find(|d| d.id == id)
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// True if nothing has been rolled.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.win {
                    format!("{}*", d.value)
                } else {
                    d.value.to_string()
                }
            })
            .collect();
        write!(
            f,
            "[{}] {}/{} wins",
            values.join(", "),
            self.successes(),
            self.count()
        )
    }
}
