//! Kline interval definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kline interval, using the exchange's interval codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1 minute klines
    #[serde(rename = "1m")]
    #[default]
    Minute1,
    /// 5 minute klines
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute klines
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute klines
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour klines
    #[serde(rename = "1h")]
    Hour1,
    /// 4 hour klines
    #[serde(rename = "4h")]
    Hour4,
    /// Daily klines
    #[serde(rename = "1d")]
    Day1,
    /// Weekly klines
    #[serde(rename = "1w")]
    Week1,
}

impl Interval {
    /// The interval code as the exchange expects it in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour4 => "4h",
            Interval::Day1 => "1d",
            Interval::Week1 => "1w",
        }
    }

    /// Duration of the interval in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Interval::Minute1 => 60,
            Interval::Minute5 => 300,
            Interval::Minute15 => 900,
            Interval::Minute30 => 1800,
            Interval::Hour1 => 3600,
            Interval::Hour4 => 14400,
            Interval::Day1 => 86400,
            Interval::Week1 => 604800,
        }
    }

    /// Duration of the interval in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.as_secs() * 1000
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::Minute1),
            "5m" => Ok(Interval::Minute5),
            "15m" => Ok(Interval::Minute15),
            "30m" => Ok(Interval::Minute30),
            "1h" => Ok(Interval::Hour1),
            "4h" => Ok(Interval::Hour4),
            "1d" => Ok(Interval::Day1),
            "1w" => Ok(Interval::Week1),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        assert_eq!(Interval::Minute1.as_secs(), 60);
        assert_eq!(Interval::Hour1.as_secs(), 3600);
        assert_eq!(Interval::Minute1.as_millis(), 60_000);
    }

    #[test]
    fn test_interval_roundtrip() {
        for s in ["1m", "5m", "15m", "30m", "1h", "4h", "1d", "1w"] {
            assert_eq!(Interval::from_str(s).unwrap().to_string(), s);
        }
        assert!(Interval::from_str("3s").is_err());
    }
}
