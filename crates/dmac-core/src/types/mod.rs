//! Core data types for the crossover bot.

mod interval;
mod ohlcv;
mod order;
mod signal;

pub use interval::Interval;
pub use ohlcv::{Bar, BarSeries};
pub use order::{OrderAck, OrderRequest, Side};
pub use signal::{Action, Decision, Evaluation};
