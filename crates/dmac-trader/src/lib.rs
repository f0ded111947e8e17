//! The polling loop.
//!
//! Every cycle the trader walks its symbol list: fetch a lookback window of
//! klines, evaluate the crossover engine on it, and act on a fresh
//! crossover by submitting a market order. Collaborators are injected
//! handles, so the loop can run against the real exchange or in-memory
//! fakes alike.

mod trader;

pub use trader::{SymbolOutcome, SymbolReport, Trader, TraderSettings};
