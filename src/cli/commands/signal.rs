//! One-shot signal command implementation.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use dmac_config::load_config;
use dmac_core::traits::MarketData;
use dmac_core::types::{BarSeries, Evaluation};
use dmac_exchange::{BinanceClient, BinanceConfig};
use dmac_strategy::Crossover;

use crate::cli::SignalArgs;

/// Fetch once and print every symbol's decision. Never places orders.
pub async fn run(args: SignalArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let engine = Crossover::new(config.strategy)?;

    // Public endpoints only; credentials are optional here.
    let (api_key, api_secret) = config.binance.credentials().unwrap_or_default();
    let mut binance = BinanceConfig::new(api_key, api_secret);
    binance.base_url = config.binance.base_url.clone();
    let client = Arc::new(BinanceClient::new(binance)?);

    let symbols = if args.symbols.is_empty() {
        config.trader.symbols.clone()
    } else {
        args.symbols
    };

    for symbol in &symbols {
        let bars = client
            .fetch_klines(symbol, config.trader.interval, config.trader.lookback)
            .await?;

        if bars.is_empty() {
            println!("{symbol}: no data");
            continue;
        }

        let series = BarSeries::from_bars(symbol.clone(), config.trader.interval, bars);
        match engine.evaluate(&series)? {
            Evaluation::InsufficientData {
                required,
                available,
            } => {
                println!("{symbol}: insufficient data ({available} bars, need {required})");
            }
            Evaluation::Decision(decision) => {
                println!(
                    "{symbol}: {} (close {:.2}, short MA {:.2}, long MA {:.2})",
                    decision.action, decision.close, decision.short_ma, decision.long_ma
                );
            }
        }
    }

    Ok(())
}
