//! Dual moving average crossover engine.
//!
//! Computes a short and a long trailing simple mean over the close prices,
//! derives a binary signal (1 where short > long, 0 otherwise) for every bar
//! where both means are defined, and reads the latest change of that signal
//! as the decision: a fresh upward crossover is a buy, a fresh downward
//! crossover is a sell, anything else is a hold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dmac_core::error::StrategyError;
use dmac_core::traits::Indicator;
use dmac_core::types::{Action, BarSeries, Decision, Evaluation};
use dmac_indicators::Sma;

/// Configuration for the crossover engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Short rolling mean window, in bars
    pub short_window: usize,
    /// Long rolling mean window, in bars
    pub long_window: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 200,
        }
    }
}

impl CrossoverConfig {
    /// Validate the window parameters.
    ///
    /// A misconfigured pair is rejected here rather than producing a
    /// silently wrong computation later.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.short_window == 0 {
            return Err(StrategyError::InvalidConfig(
                "short window must be at least 1".into(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(StrategyError::InvalidConfig(format!(
                "short window ({}) must be less than long window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// The crossover signal engine.
///
/// Evaluation is a pure function of the input series and the configured
/// windows: no internal state, no randomness, safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Crossover {
    config: CrossoverConfig,
    short: Sma,
    long: Sma,
}

impl Crossover {
    /// Create a new engine, rejecting invalid window pairs.
    pub fn new(config: CrossoverConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        Ok(Self {
            short: Sma::new(config.short_window),
            long: Sma::new(config.long_window),
            config,
        })
    }

    /// The configured windows.
    pub fn config(&self) -> &CrossoverConfig {
        &self.config
    }

    /// Bars needed for a defined decision.
    ///
    /// Both means are defined from `long_window` bars on, but the decision
    /// reads a signal *change*, which needs two aligned signal points;
    /// the first aligned bar carries no position value.
    pub fn warmup_period(&self) -> usize {
        self.config.long_window + 1
    }

    /// Binary signal per bar, aligned from index `long_window - 1` of the
    /// input. 1 where the short mean is strictly above the long mean.
    ///
    /// Equal means give 0, so a flat series never signals.
    pub fn signals(&self, closes: &[f64]) -> Vec<u8> {
        let short = self.short.calculate(closes);
        let long = self.long.calculate(closes);
        Self::align_signals(&short, &long)
    }

    /// Compare the mean series where both are defined.
    ///
    /// The short series starts earlier, so its head is skipped.
    fn align_signals(short: &[f64], long: &[f64]) -> Vec<u8> {
        if long.is_empty() {
            return vec![];
        }
        let offset = short.len() - long.len();
        short[offset..]
            .iter()
            .zip(long.iter())
            .map(|(s, l)| u8::from(s > l))
            .collect()
    }

    /// Discrete difference of the signal series.
    ///
    /// The first aligned bar is dropped: with no prior signal to diff
    /// against, it cannot witness a crossover.
    pub fn positions(signals: &[u8]) -> Vec<i8> {
        signals
            .windows(2)
            .map(|w| w[1] as i8 - w[0] as i8)
            .collect()
    }

    /// Evaluate a series and decide for its most recent bar.
    ///
    /// Malformed input (non-monotonic timestamps, non-finite fields) is
    /// rejected before any computation. A series shorter than the warmup
    /// is a valid `InsufficientData` outcome, not an error.
    pub fn evaluate(&self, series: &BarSeries) -> Result<Evaluation, StrategyError> {
        series.validate()?;

        let required = self.warmup_period();
        let available = series.len();
        if available < required {
            return Ok(Evaluation::InsufficientData {
                required,
                available,
            });
        }

        let closes = series.closes();
        let short = self.short.calculate(&closes);
        let long = self.long.calculate(&closes);

        let (Some(&short_ma), Some(&long_ma), Some(bar)) =
            (short.last(), long.last(), series.last())
        else {
            return Ok(Evaluation::InsufficientData {
                required,
                available,
            });
        };

        let signals = Self::align_signals(&short, &long);
        let positions = Self::positions(&signals);

        let action = match positions.last() {
            Some(1) => Action::Buy,
            Some(-1) => Action::Sell,
            _ => Action::Hold,
        };

        debug!(
            symbol = %series.symbol,
            %action,
            short_ma,
            long_ma,
            "evaluated series"
        );

        Ok(Evaluation::Decision(Decision {
            symbol: series.symbol.clone(),
            action,
            short_ma,
            long_ma,
            close: bar.close,
            timestamp: bar.timestamp,
        }))
    }
}
