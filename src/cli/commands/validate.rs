//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use dmac_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            config.strategy.validate()?;

            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Symbols: {}", config.trader.symbols.join(", "));
            println!("Interval: {}", config.trader.interval);
            println!(
                "Windows: short {} / long {}",
                config.strategy.short_window, config.strategy.long_window
            );
            println!("Order quantity: {}", config.trader.order_qty);
            println!("Dry run: {}", config.trader.dry_run);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
