//! Wire types for the Binance REST API.

use rust_decimal::Decimal;
use serde::Deserialize;

use dmac_core::error::DataError;
use dmac_core::types::Bar;

/// One kline row as Binance returns it: a positional JSON array of mixed
/// number and string elements.
#[derive(Debug, Deserialize)]
pub(crate) struct RawKline(
    pub i64,    // 0: open time
    pub String, // 1: open
    pub String, // 2: high
    pub String, // 3: low
    pub String, // 4: close
    pub String, // 5: volume
    pub i64,    // 6: close time
    pub String, // 7: quote asset volume
    pub i64,    // 8: number of trades
    pub String, // 9: taker buy base volume
    pub String, // 10: taker buy quote volume
    pub String, // 11: unused
);

impl RawKline {
    /// Convert into a core bar, rejecting malformed price fields.
    pub(crate) fn into_bar(self) -> Result<Bar, DataError> {
        fn parse(field: &'static str, value: &str) -> Result<f64, DataError> {
            value
                .parse::<f64>()
                .map_err(|_| DataError::Parse(format!("kline {} is not numeric: {:?}", field, value)))
        }

        Ok(Bar::new(
            self.0,
            parse("open", &self.1)?,
            parse("high", &self.2)?,
            parse("low", &self.3)?,
            parse("close", &self.4)?,
            parse("volume", &self.5)?,
        ))
    }
}

/// Binance error payload, returned with a non-2xx status or embedded in an
/// otherwise-200 body.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorPayload {
    pub code: i64,
    pub msg: String,
}

/// One fill reported in a market order response.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderFill {
    pub price: Decimal,
    pub qty: Decimal,
}

/// Response to a new-order request (`FULL` response type).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewOrderResponse {
    pub order_id: i64,
    pub symbol: String,
    pub side: String,
    pub status: String,
    pub executed_qty: Decimal,
    #[serde(default)]
    pub fills: Vec<OrderFill>,
}

impl NewOrderResponse {
    /// Quantity-weighted average fill price, when fills were reported.
    pub(crate) fn avg_price(&self) -> Option<Decimal> {
        let total_qty: Decimal = self.fills.iter().map(|f| f.qty).sum();
        if total_qty.is_zero() {
            return None;
        }
        let notional: Decimal = self.fills.iter().map(|f| f.price * f.qty).sum();
        Some(notional / total_qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_kline_parses() {
        let json = r#"[1672531200000,"16500.1","16550.0","16480.5","16525.3","120.5",1672531259999,"1991000.0",350,"60.2","995000.0","0"]"#;
        let raw: RawKline = serde_json::from_str(json).unwrap();
        let bar = raw.into_bar().unwrap();

        assert_eq!(bar.timestamp, 1672531200000);
        assert!((bar.open - 16500.1).abs() < 1e-9);
        assert!((bar.close - 16525.3).abs() < 1e-9);
        assert!((bar.volume - 120.5).abs() < 1e-9);
    }

    #[test]
    fn test_raw_kline_rejects_bad_price() {
        let json = r#"[1672531200000,"16500.1","not-a-number","16480.5","16525.3","120.5",1672531259999,"0",0,"0","0","0"]"#;
        let raw: RawKline = serde_json::from_str(json).unwrap();
        assert!(matches!(raw.into_bar(), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_error_payload() {
        let payload: ApiErrorPayload =
            serde_json::from_str(r#"{"code":-1121,"msg":"Invalid symbol."}"#).unwrap();
        assert_eq!(payload.code, -1121);
        assert_eq!(payload.msg, "Invalid symbol.");
    }

    #[test]
    fn test_order_response_avg_price() {
        let json = r#"{
            "orderId": 28,
            "symbol": "BTCUSDT",
            "side": "BUY",
            "status": "FILLED",
            "executedQty": "0.0002",
            "fills": [
                {"price": "100.0", "qty": "0.0001"},
                {"price": "102.0", "qty": "0.0001"}
            ]
        }"#;
        let resp: NewOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.order_id, 28);
        assert_eq!(resp.executed_qty, dec!(0.0002));
        assert_eq!(resp.avg_price(), Some(dec!(101.0)));
    }

    #[test]
    fn test_order_response_without_fills() {
        let json = r#"{
            "orderId": 29,
            "symbol": "BTCUSDT",
            "side": "SELL",
            "status": "EXPIRED",
            "executedQty": "0"
        }"#;
        let resp: NewOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.avg_price(), None);
    }
}
