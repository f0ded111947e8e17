//! Binance spot REST connector.
//!
//! Implements the bot's market data and order execution seams against the
//! Binance REST API: public kline fetches and HMAC-SHA256-signed market
//! orders.

mod client;
mod types;

pub use client::{BinanceClient, BinanceConfig};
