//! Signal evaluation results.

use serde::{Deserialize, Serialize};

use super::Side;

/// Trading action derived from the latest position change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Short mean crossed above the long mean on the latest bar
    Buy,
    /// Short mean crossed below the long mean on the latest bar
    Sell,
    /// No crossover on the latest bar
    Hold,
}

impl Action {
    /// The order side this action maps to, if it is actionable.
    pub fn side(&self) -> Option<Side> {
        match self {
            Action::Buy => Some(Side::Buy),
            Action::Sell => Some(Side::Sell),
            Action::Hold => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

/// A defined decision for the most recent bar, with the rolling means
/// carried along for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Instrument the decision applies to
    pub symbol: String,
    /// The action for the latest bar
    pub action: Action,
    /// Latest short rolling mean
    pub short_ma: f64,
    /// Latest long rolling mean
    pub long_ma: f64,
    /// Latest close price
    pub close: f64,
    /// Open time of the latest bar (Unix ms)
    pub timestamp: i64,
}

/// Outcome of evaluating a series.
///
/// A series that is too short for the configured windows is a valid
/// outcome the caller reacts to by widening its lookback, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Not enough bars for a defined decision
    InsufficientData { required: usize, available: usize },
    /// A defined decision for the latest bar
    Decision(Decision),
}

impl Evaluation {
    /// The decision, if one is defined.
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Evaluation::Decision(d) => Some(d),
            Evaluation::InsufficientData { .. } => None,
        }
    }

    /// Check whether the series was too short.
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Evaluation::InsufficientData { .. })
    }
}
