//! Error types for the crossover bot.

use thiserror::Error;

/// Top-level bot error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Market data error: {0}")]
    Data(#[from] DataError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Malformed bar series rejected before computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("timestamps must be strictly increasing: bar {index} at {timestamp} follows {previous}")]
    NonMonotonic {
        index: usize,
        timestamp: i64,
        previous: i64,
    },

    #[error("bar {index} has invalid {field}: {value} (must be finite and non-negative)")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Market data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Exchange API error: code {code}, msg: {msg}")]
    Api { code: i64, msg: String },

    #[error("Rate limited by exchange")]
    RateLimited,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}

/// Order execution errors.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Exchange API error: code {code}, msg: {msg}")]
    Api { code: i64, msg: String },

    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for bot operations.
pub type BotResult<T> = Result<T, BotError>;
