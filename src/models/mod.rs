use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Fear & Greed Index reading (0 = extreme fear, 100 = extreme greed)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentReading {
    pub score: u32,
    pub classification: String,
    pub fetched_at: DateTime<Utc>,
}

/// Last trade price from the public ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    pub pair: String,
    pub last: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Spot order payload for the private endpoint.
///
/// Field order matters: the serialized JSON string is what gets signed, and
/// the wire contract is pair, amount, price, side, type, post_only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub pair: String,
    pub amount: String,
    pub price: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub post_only: bool,
}

impl OrderRequest {
    /// Build a post-only limit buy. Amount is formatted to 6 decimals and
    /// the price to a whole-yen string, matching what the exchange accepts.
    pub fn limit_buy(pair: &str, quantity: f64, limit_price: u64) -> Self {
        Self {
            pair: pair.to_string(),
            amount: format!("{quantity:.6}"),
            price: limit_price.to_string(),
            side: "buy".to_string(),
            order_type: "limit".to_string(),
            post_only: true,
        }
    }
}

/// Business-level response envelope from the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub success: i64,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// What a single run ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// An order was accepted by the exchange
    Placed { quantity: f64, limit_price: u64 },
    /// Computed quantity fell under the exchange minimum; nothing sent
    SkippedBelowMinimum { quantity: f64 },
    /// Dry-run mode: the order was computed and logged but not submitted
    DryRun { quantity: f64, limit_price: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_buy_formatting() {
        let order = OrderRequest::limit_buy("btc_jpy", 0.006, 4_975_000);
        assert_eq!(order.amount, "0.006000");
        assert_eq!(order.price, "4975000");
        assert_eq!(order.side, "buy");
        assert_eq!(order.order_type, "limit");
        assert!(order.post_only);
    }

    #[test]
    fn test_order_serializes_in_wire_order() {
        let order = OrderRequest::limit_buy("btc_jpy", 0.0014, 4_975_000);
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"{"pair":"btc_jpy","amount":"0.001400","price":"4975000","side":"buy","type":"limit","post_only":true}"#
        );
    }
}
