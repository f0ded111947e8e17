//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BinanceSettings, LoggingSettings, TraderConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed with `DMAC` override file values, e.g.
/// `DMAC__TRADER__DRY_RUN=false`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("DMAC")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
