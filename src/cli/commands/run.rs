//! Trading loop command implementation.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use dmac_config::load_config;
use dmac_exchange::{BinanceClient, BinanceConfig};
use dmac_strategy::Crossover;
use dmac_trader::{Trader, TraderSettings};

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let engine = Crossover::new(config.strategy)?;

    let dry_run = config.trader.dry_run || args.dry_run;

    // Kline fetches are public; credentials are only mandatory when the
    // loop is actually allowed to place orders.
    let (api_key, api_secret) = if dry_run {
        config.binance.credentials().unwrap_or_default()
    } else {
        config.binance.credentials()?
    };

    let mut binance = BinanceConfig::new(api_key, api_secret);
    binance.base_url = config.binance.base_url.clone();
    binance.recv_window = config.binance.recv_window;
    let client = Arc::new(BinanceClient::new(binance)?);

    let symbols = if args.symbols.is_empty() {
        config.trader.symbols.clone()
    } else {
        args.symbols
    };

    let settings = TraderSettings {
        symbols,
        interval: config.trader.interval,
        order_qty: config.trader.order_qty,
        lookback: config.trader.lookback,
        lookback_step: config.trader.lookback_step,
        max_lookback: config.trader.max_lookback,
        symbol_delay: Duration::from_secs(config.trader.symbol_delay_secs),
        cycle_delay: Duration::from_secs(config.trader.cycle_delay_secs),
        dry_run,
    };

    info!(
        short_window = engine.config().short_window,
        long_window = engine.config().long_window,
        dry_run,
        "configuration loaded"
    );

    let mut trader = Trader::new(client.clone(), client, engine, settings);
    trader.run().await;

    Ok(())
}
