//! Market data trait definition.

use crate::error::DataError;
use crate::types::{Bar, Interval};
use async_trait::async_trait;

/// Trait for historical market data sources.
///
/// The trading loop fetches a fresh lookback window every cycle instead of
/// maintaining a live subscription, so this seam only covers batch fetches.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent klines for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `interval` - The kline interval
    /// * `limit` - Maximum number of klines to return
    ///
    /// # Returns
    /// Bars ordered from oldest to newest. An empty vector is a valid
    /// "no data" outcome, not an error.
    async fn fetch_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
