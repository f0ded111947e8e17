//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::SeriesError;

use super::Interval;

/// One closed kline. Uses f64 for fast indicator calculations.
///
/// Bars are produced once by the market data source and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Open time as a Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Base asset volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// The bar's price range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if the bar closed above its open.
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if the bar closed below its open.
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get the open time as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Check every price/volume field for being finite and non-negative.
    fn field_check(&self) -> Option<(&'static str, f64)> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        fields
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
    }
}

/// Time-ordered series of bars for one instrument.
///
/// Backed by a deque so a live feed can append while old bars fall off
/// the front once the capacity is reached.
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Instrument symbol, e.g. "BTCUSDT"
    pub symbol: String,
    /// Kline interval of the bars
    pub interval: Interval,
    bars: VecDeque<Bar>,
    /// Maximum number of bars retained (0 = unlimited)
    capacity: usize,
}

impl BarSeries {
    /// Create a new empty series.
    pub fn new(symbol: String, interval: Interval) -> Self {
        Self {
            symbol,
            interval,
            bars: VecDeque::new(),
            capacity: 0,
        }
    }

    /// Create a series that retains at most `capacity` bars.
    pub fn with_capacity(symbol: String, interval: Interval, capacity: usize) -> Self {
        Self {
            symbol,
            interval,
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a series from bars already fetched from the exchange.
    pub fn from_bars(symbol: String, interval: Interval, bars: Vec<Bar>) -> Self {
        Self {
            symbol,
            interval,
            bars: bars.into(),
            capacity: 0,
        }
    }

    /// Push a new bar, dropping the oldest if at capacity.
    pub fn push(&mut self, bar: Bar) {
        if self.capacity > 0 && self.bars.len() >= self.capacity {
            self.bars.pop_front();
        }
        self.bars.push_back(bar);
    }

    /// Push multiple bars.
    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(bar);
        }
    }

    /// Number of bars in the series.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get the most recent bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Iterate over the bars, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }

    /// Reject malformed input before any computation runs on it.
    ///
    /// Timestamps must be strictly increasing (which also rules out
    /// duplicates) and every price/volume field must be a finite,
    /// non-negative number. Values are never silently coerced.
    pub fn validate(&self) -> Result<(), SeriesError> {
        let mut prev: Option<i64> = None;
        for (index, bar) in self.bars.iter().enumerate() {
            if let Some((field, value)) = bar.field_check() {
                return Err(SeriesError::InvalidField {
                    index,
                    field,
                    value,
                });
            }
            if let Some(previous) = prev {
                if bar.timestamp <= previous {
                    return Err(SeriesError::NonMonotonic {
                        index,
                        timestamp: bar.timestamp,
                        previous,
                    });
                }
            }
            prev = Some(bar.timestamp);
        }
        Ok(())
    }
}

impl FromIterator<Bar> for BarSeries {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        let bars: VecDeque<Bar> = iter.into_iter().collect();
        Self {
            symbol: String::new(),
            interval: Interval::default(),
            bars,
            capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_bar_helpers() {
        let b = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 50.0);
        assert!((b.range() - 15.0).abs() < 1e-10);
        assert!(b.is_bullish());
        assert!(!b.is_bearish());
    }

    #[test]
    fn test_series_capacity() {
        let mut series = BarSeries::with_capacity("BTCUSDT".to_string(), Interval::Minute1, 3);
        for ts in 1..=4 {
            series.push(bar(ts, 100.0));
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(0).unwrap().timestamp, 2);
    }

    #[test]
    fn test_series_closes() {
        let mut series = BarSeries::new("BTCUSDT".to_string(), Interval::Minute1);
        series.push(bar(1, 100.5));
        series.push(bar(2, 101.5));
        assert_eq!(series.closes(), vec![100.5, 101.5]);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let series: BarSeries = (1..=5).map(|ts| bar(ts, 100.0 + ts as f64)).collect();
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_monotonic() {
        let mut series = BarSeries::new("BTCUSDT".to_string(), Interval::Minute1);
        series.push(bar(10, 100.0));
        series.push(bar(10, 101.0));
        assert!(matches!(
            series.validate(),
            Err(SeriesError::NonMonotonic { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_close() {
        let mut series = BarSeries::new("BTCUSDT".to_string(), Interval::Minute1);
        series.push(bar(1, 100.0));
        series.push(Bar::new(2, 100.0, 101.0, 99.0, f64::NAN, 1000.0));
        assert!(matches!(
            series.validate(),
            Err(SeriesError::InvalidField { field: "close", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_volume() {
        let mut series = BarSeries::new("BTCUSDT".to_string(), Interval::Minute1);
        series.push(Bar::new(1, 100.0, 101.0, 99.0, 100.0, -1.0));
        assert!(matches!(
            series.validate(),
            Err(SeriesError::InvalidField { field: "volume", .. })
        ));
    }
}
