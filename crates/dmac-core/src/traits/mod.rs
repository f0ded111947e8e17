//! Seam traits for the crossover bot.

mod executor;
mod indicator;
mod market_data;

pub use executor::OrderExecutor;
pub use indicator::{Indicator, StreamingIndicator};
pub use market_data::MarketData;
