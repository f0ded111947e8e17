//! Configuration structures.

use dmac_core::error::BotError;
use dmac_core::types::Interval;
use dmac_strategy::CrossoverConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub binance: BinanceSettings,
    #[serde(default)]
    pub strategy: CrossoverConfig,
    #[serde(default)]
    pub trader: TraderConfig,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "dmac".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Binance API configuration.
///
/// Credentials are named indirectly: the file carries the environment
/// variable names, never the secrets themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinanceSettings {
    pub api_key_env: String,
    pub api_secret_env: String,
    pub base_url: String,
    pub recv_window: u64,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            api_key_env: "BINANCE_API_KEY".to_string(),
            api_secret_env: "BINANCE_API_SECRET".to_string(),
            base_url: "https://api.binance.com".to_string(),
            recv_window: 5000,
        }
    }
}

impl BinanceSettings {
    /// Resolve the API credentials from the configured environment variables.
    pub fn credentials(&self) -> Result<(String, String), BotError> {
        let api_key = std::env::var(&self.api_key_env)
            .map_err(|_| BotError::Config(format!("{} not set", self.api_key_env)))?;
        let api_secret = std::env::var(&self.api_secret_env)
            .map_err(|_| BotError::Config(format!("{} not set", self.api_secret_env)))?;
        Ok((api_key, api_secret))
    }
}

/// Trading loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraderConfig {
    pub symbols: Vec<String>,
    pub interval: Interval,
    pub order_qty: Decimal,
    pub lookback: u16,
    pub lookback_step: u16,
    pub max_lookback: u16,
    pub symbol_delay_secs: u64,
    pub cycle_delay_secs: u64,
    pub dry_run: bool,
}

impl Default for TraderConfig {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            symbols: vec!["BTCUSDT".to_string()],
            interval: Interval::Minute1,
            order_qty: dec!(0.0001),
            lookback: 300,
            lookback_step: 100,
            max_lookback: 1000,
            symbol_delay_secs: 15,
            cycle_delay_secs: 60,
            dry_run: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();

        assert_eq!(config.strategy.short_window, 50);
        assert_eq!(config.strategy.long_window, 200);
        assert_eq!(config.trader.order_qty, dec!(0.0001));
        assert_eq!(config.trader.interval, Interval::Minute1);
        assert_eq!(config.trader.lookback, 300);
        assert_eq!(config.trader.lookback_step, 100);
        assert_eq!(config.trader.symbol_delay_secs, 15);
        assert_eq!(config.trader.cycle_delay_secs, 60);
        assert!(config.trader.dry_run);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            [app]
            name = "dmac"
            environment = "production"

            [strategy]
            short_window = 20
            long_window = 60

            [trader]
            symbols = ["BTCUSDT", "ETHUSDT"]
            interval = "5m"
            order_qty = "0.001"
            lookback = 120
            lookback_step = 50
            max_lookback = 1000
            symbol_delay_secs = 5
            cycle_delay_secs = 30
            dry_run = false
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.environment, "production");
        assert_eq!(config.strategy.short_window, 20);
        assert_eq!(config.trader.symbols, vec!["BTCUSDT", "ETHUSDT"]);
        assert_eq!(config.trader.interval, Interval::Minute5);
        assert_eq!(config.trader.order_qty, dec!(0.001));
        assert!(!config.trader.dry_run);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
            [trader]
            symbols = ["SOLUSDT"]
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.trader.symbols, vec!["SOLUSDT"]);
        assert_eq!(config.strategy.long_window, 200);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_credentials_are_config_errors() {
        let settings = BinanceSettings {
            api_key_env: "DMAC_TEST_MISSING_KEY".to_string(),
            api_secret_env: "DMAC_TEST_MISSING_SECRET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.credentials(),
            Err(BotError::Config(_))
        ));
    }
}
