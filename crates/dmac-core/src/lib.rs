//! Core types and traits for the crossover bot.
//!
//! This crate provides the foundational building blocks:
//! - Market data types (Bar, BarSeries, Interval)
//! - Order submission types
//! - Signal evaluation results
//! - Seam traits for market data, order execution, and indicators

pub mod error;
pub mod traits;
pub mod types;

pub use error::{BotError, BotResult};
pub use traits::*;
pub use types::*;
