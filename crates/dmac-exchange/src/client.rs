//! Binance REST client.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{header, Client, StatusCode};
use sha2::Sha256;
use tracing::{debug, info};

use dmac_core::error::{DataError, ExecutionError};
use dmac_core::traits::{MarketData, OrderExecutor};
use dmac_core::types::{Bar, Interval, OrderAck, OrderRequest, Side};

use crate::types::{ApiErrorPayload, NewOrderResponse, RawKline};

type HmacSha256 = Hmac<Sha256>;

const MAINNET_URL: &str = "https://api.binance.com";
const TESTNET_URL: &str = "https://testnet.binance.vision";

/// Largest number of klines the spot API returns per request.
pub const MAX_KLINE_LIMIT: u16 = 1000;

/// Binance API configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    /// Signed-request validity window in milliseconds
    pub recv_window: u64,
}

impl BinanceConfig {
    /// Create config directly with key and secret, targeting mainnet.
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            base_url: MAINNET_URL.to_string(),
            recv_window: 5000,
        }
    }

    /// Load from environment variables.
    ///
    /// `BINANCE_TESTNET=true` switches to the spot testnet.
    pub fn from_env() -> Result<Self, ExecutionError> {
        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| ExecutionError::Configuration("BINANCE_API_KEY not set".into()))?;
        let api_secret = std::env::var("BINANCE_API_SECRET")
            .map_err(|_| ExecutionError::Configuration("BINANCE_API_SECRET not set".into()))?;
        let testnet = std::env::var("BINANCE_TESTNET")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let mut config = Self::new(api_key, api_secret);
        if testnet {
            config.base_url = TESTNET_URL.to_string();
        }
        Ok(config)
    }

    /// Override the base URL (testnet, mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Binance REST client.
///
/// Kline fetches hit public endpoints; order submission signs the query
/// string with HMAC-SHA256 and sends the API key header.
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// Create a new client.
    pub fn new(config: BinanceConfig) -> Result<Self, ExecutionError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-MBX-APIKEY",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ExecutionError::Configuration(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, ExecutionError> {
        Self::new(BinanceConfig::from_env()?)
    }

    /// HMAC-SHA256 signature over a query string, hex encoded.
    fn sign(&self, query: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.config.api_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Append timestamp, recvWindow and signature to a query string.
    fn signed_query(&self, mut params: String) -> String {
        if !params.is_empty() {
            params.push('&');
        }
        params.push_str(&format!(
            "recvWindow={}&timestamp={}",
            self.config.recv_window,
            Utc::now().timestamp_millis()
        ));
        let signature = self.sign(&params);
        params.push_str(&format!("&signature={}", signature));
        params
    }

    /// Fetch the most recent klines for a symbol.
    ///
    /// `GET /api/v3/klines`, public. An empty body means the exchange has
    /// no data for the request; that is returned as an empty vector.
    pub async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<Bar>, DataError> {
        let limit = limit.min(MAX_KLINE_LIMIT);
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.config.base_url, symbol, interval, limit
        );

        debug!(symbol, %interval, limit, "fetching klines");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(DataError::RateLimited);
            }
            if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&body) {
                return Err(DataError::Api {
                    code: payload.code,
                    msg: payload.msg,
                });
            }
            return Err(DataError::Connection(format!("{}: {}", status, body)));
        }

        let raw: Vec<RawKline> = serde_json::from_str(&body).map_err(|e| {
            // A 200 body that is not a kline array may still be an error object.
            if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&body) {
                DataError::Api {
                    code: payload.code,
                    msg: payload.msg,
                }
            } else {
                DataError::Parse(e.to_string())
            }
        })?;

        raw.into_iter().map(RawKline::into_bar).collect()
    }

    /// Submit a market order.
    ///
    /// `POST /api/v3/order` with a signed query string.
    pub async fn create_market_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderAck, ExecutionError> {
        let params = format!(
            "symbol={}&side={}&type=MARKET&quantity={}",
            request.symbol,
            request.side,
            request.quantity.normalize()
        );
        let query = self.signed_query(params);
        let url = format!("{}/api/v3/order?{}", self.config.base_url, query);

        info!(symbol = %request.symbol, side = %request.side, qty = %request.quantity, "submitting market order");

        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        if !status.is_success() {
            if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&body) {
                return Err(ExecutionError::Api {
                    code: payload.code,
                    msg: payload.msg,
                });
            }
            return Err(ExecutionError::Rejected(format!("{}: {}", status, body)));
        }

        let parsed: NewOrderResponse =
            serde_json::from_str(&body).map_err(|e| ExecutionError::Parse(e.to_string()))?;

        let side = match parsed.side.as_str() {
            "BUY" => Side::Buy,
            "SELL" => Side::Sell,
            other => {
                return Err(ExecutionError::Parse(format!("unknown side: {}", other)));
            }
        };

        let avg_price = parsed.avg_price();
        Ok(OrderAck {
            order_id: parsed.order_id,
            symbol: parsed.symbol,
            side,
            status: parsed.status,
            executed_qty: parsed.executed_qty,
            avg_price,
        })
    }
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn fetch_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<Bar>, DataError> {
        self.klines(symbol, interval, limit).await
    }

    fn name(&self) -> &str {
        "binance"
    }
}

#[async_trait]
impl OrderExecutor for BinanceClient {
    async fn submit_market_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderAck, ExecutionError> {
        self.create_market_order(request).await
    }

    fn name(&self) -> &str {
        "binance"
    }
}
