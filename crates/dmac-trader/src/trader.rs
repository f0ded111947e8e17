//! Trader loop implementation.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{error, info, warn};

use dmac_core::traits::{MarketData, OrderExecutor};
use dmac_core::types::{BarSeries, Decision, Evaluation, Interval, OrderRequest};
use dmac_strategy::Crossover;

/// Runtime settings for the polling loop.
#[derive(Debug, Clone)]
pub struct TraderSettings {
    /// Symbols checked each cycle, in order
    pub symbols: Vec<String>,
    /// Kline interval fetched for every symbol
    pub interval: Interval,
    /// Market order quantity in the base asset
    pub order_qty: Decimal,
    /// Initial number of klines fetched per symbol
    pub lookback: u16,
    /// How many klines to add when a series comes back too short
    pub lookback_step: u16,
    /// Upper bound on the lookback (the exchange caps requests)
    pub max_lookback: u16,
    /// Pause between symbols within a cycle
    pub symbol_delay: Duration,
    /// Pause between cycles
    pub cycle_delay: Duration,
    /// Log decisions without submitting orders
    pub dry_run: bool,
}

impl Default for TraderSettings {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDT".to_string()],
            interval: Interval::Minute1,
            order_qty: Decimal::new(1, 4), // 0.0001
            lookback: 300,
            lookback_step: 100,
            max_lookback: 1000,
            symbol_delay: Duration::from_secs(15),
            cycle_delay: Duration::from_secs(60),
            dry_run: true,
        }
    }
}

/// What happened for one symbol during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    /// The fetch failed; the symbol is skipped until the next cycle
    FetchFailed(String),
    /// The exchange returned no klines
    NoData,
    /// The series was too short; the lookback was widened for next time
    InsufficientData {
        required: usize,
        available: usize,
        widened_to: u16,
    },
    /// The engine rejected the fetched series as malformed
    EvaluationFailed(String),
    /// No crossover on the latest bar
    Held(Decision),
    /// A crossover fired but dry-run suppressed the order
    DryRun(Decision),
    /// A market order was submitted
    Submitted { decision: Decision, order_id: i64 },
    /// Order submission failed; never retried within the cycle
    SubmitFailed { decision: Decision, error: String },
}

/// Per-symbol result of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolReport {
    pub symbol: String,
    pub outcome: SymbolOutcome,
}

/// The polling loop.
pub struct Trader {
    market: Arc<dyn MarketData>,
    executor: Arc<dyn OrderExecutor>,
    engine: Crossover,
    settings: TraderSettings,
    lookback: u16,
}

impl Trader {
    /// Create a new trader from injected collaborators.
    pub fn new(
        market: Arc<dyn MarketData>,
        executor: Arc<dyn OrderExecutor>,
        engine: Crossover,
        settings: TraderSettings,
    ) -> Self {
        let lookback = settings.lookback.min(settings.max_lookback);
        Self {
            market,
            executor,
            engine,
            settings,
            lookback,
        }
    }

    /// The current lookback window, in klines.
    pub fn lookback(&self) -> u16 {
        self.lookback
    }

    /// Run cycles forever.
    pub async fn run(&mut self) {
        info!(
            symbols = ?self.settings.symbols,
            interval = %self.settings.interval,
            dry_run = self.settings.dry_run,
            "starting trading loop"
        );
        loop {
            self.run_cycle().await;
            info!(
                delay_secs = self.settings.cycle_delay.as_secs(),
                "cycle complete, waiting for the next one"
            );
            sleep(self.settings.cycle_delay).await;
        }
    }

    /// Run one pass over all configured symbols.
    pub async fn run_cycle(&mut self) -> Vec<SymbolReport> {
        let symbols = self.settings.symbols.clone();
        let mut reports = Vec::with_capacity(symbols.len());

        for (i, symbol) in symbols.iter().enumerate() {
            let outcome = self.check_symbol(symbol).await;
            reports.push(SymbolReport {
                symbol: symbol.clone(),
                outcome,
            });

            if i + 1 < symbols.len() {
                sleep(self.settings.symbol_delay).await;
            }
        }

        reports
    }

    /// Fetch, evaluate, and act for one symbol.
    async fn check_symbol(&mut self, symbol: &str) -> SymbolOutcome {
        let bars = match self
            .market
            .fetch_klines(symbol, self.settings.interval, self.lookback)
            .await
        {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol, error = %e, "kline fetch failed");
                return SymbolOutcome::FetchFailed(e.to_string());
            }
        };

        if bars.is_empty() {
            warn!(symbol, "no klines returned");
            return SymbolOutcome::NoData;
        }

        let series = BarSeries::from_bars(symbol.to_string(), self.settings.interval, bars);

        let evaluation = match self.engine.evaluate(&series) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!(symbol, error = %e, "series rejected");
                return SymbolOutcome::EvaluationFailed(e.to_string());
            }
        };

        match evaluation {
            Evaluation::InsufficientData {
                required,
                available,
            } => {
                self.widen_lookback();
                info!(
                    symbol,
                    required,
                    available,
                    lookback = self.lookback,
                    "series too short, widened lookback"
                );
                SymbolOutcome::InsufficientData {
                    required,
                    available,
                    widened_to: self.lookback,
                }
            }
            Evaluation::Decision(decision) => self.act_on(decision).await,
        }
    }

    fn widen_lookback(&mut self) {
        self.lookback = self
            .lookback
            .saturating_add(self.settings.lookback_step)
            .min(self.settings.max_lookback);
    }

    /// Act on a defined decision: submit on a fresh crossover, log otherwise.
    async fn act_on(&self, decision: Decision) -> SymbolOutcome {
        let Some(side) = decision.action.side() else {
            info!(
                symbol = %decision.symbol,
                short_ma = decision.short_ma,
                long_ma = decision.long_ma,
                "holding"
            );
            return SymbolOutcome::Held(decision);
        };

        info!(
            symbol = %decision.symbol,
            action = %decision.action,
            close = decision.close,
            short_ma = decision.short_ma,
            long_ma = decision.long_ma,
            "crossover detected"
        );

        if self.settings.dry_run {
            return SymbolOutcome::DryRun(decision);
        }

        let request = OrderRequest::market(&decision.symbol, side, self.settings.order_qty);
        match self.executor.submit_market_order(&request).await {
            Ok(ack) => {
                info!(
                    symbol = %ack.symbol,
                    order_id = ack.order_id,
                    status = %ack.status,
                    executed_qty = %ack.executed_qty,
                    "order submitted"
                );
                SymbolOutcome::Submitted {
                    decision,
                    order_id: ack.order_id,
                }
            }
            Err(e) => {
                error!(symbol = %decision.symbol, error = %e, "order submission failed");
                SymbolOutcome::SubmitFailed {
                    decision,
                    error: e.to_string(),
                }
            }
        }
    }
}
