use anyhow::{Context, Result};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use tokio::time::{sleep, Duration};

use crate::config::Config;
use crate::models::{OrderRequest, OrderResponse, TickerPrice};

const ORDER_PATH: &str = "/v1/user/spot/order";

/// Validity window (ms) the exchange accepts a signed request within
const TIME_WINDOW_MS: &str = "5000";

const INITIAL_BACKOFF_MS: u64 = 2000;

/// bitbank client: public ticker reads plus signed private order writes
#[derive(Clone)]
pub struct BitbankClient {
    client: Client,
    public_url: String,
    private_url: String,
    api_key: String,
    api_secret: String,
    attempts: u32,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    data: TickerData,
}

#[derive(Debug, Deserialize)]
struct TickerData {
    last: String,
}

impl BitbankClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            public_url: config.public_url.clone(),
            private_url: config.private_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            attempts: config.http_attempts.max(1),
        })
    }

    /// Fetch the last trade price from the public ticker.
    pub async fn get_ticker(&self, pair: &str) -> Result<TickerPrice> {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match self.fetch_ticker_once(pair).await {
                Ok(price) => {
                    tracing::info!("Ticker {}: last price {}", pair, price.last);
                    return Ok(price);
                }
                Err(e) => {
                    last_error = Some(e);

                    if attempt < self.attempts {
                        let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt - 1);
                        tracing::warn!(
                            "Attempt {}/{} fetching {} ticker failed: {}. Retrying in {}ms...",
                            attempt,
                            self.attempts,
                            pair,
                            last_error.as_ref().unwrap(),
                            backoff_ms
                        );
                        sleep(Duration::from_millis(backoff_ms)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap())
    }

    async fn fetch_ticker_once(&self, pair: &str) -> Result<TickerPrice> {
        let url = format!("{}/{}/ticker", self.public_url, pair);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach ticker endpoint")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Ticker endpoint returned {}", status);
        }

        let body: TickerResponse = response
            .json()
            .await
            .context("Failed to parse ticker response")?;

        let last: f64 = body
            .data
            .last
            .parse()
            .with_context(|| format!("Ticker last price is not numeric: {:?}", body.data.last))?;

        Ok(TickerPrice {
            pair: pair.to_string(),
            last,
            fetched_at: Utc::now(),
        })
    }

    /// Submit a signed spot order to the private endpoint.
    ///
    /// The body is serialized once; the signed string and the sent bytes
    /// must match exactly or the exchange rejects the signature.
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse> {
        let body = serde_json::to_string(order).context("Failed to serialize order")?;
        let request_time = Utc::now().timestamp_millis().to_string();
        let signature = sign_request(&self.api_secret, &request_time, TIME_WINDOW_MS, &body);

        let url = format!("{}{}", self.private_url, ORDER_PATH);

        let response = self
            .client
            .post(&url)
            .header("ACCESS-KEY", &self.api_key)
            .header("ACCESS-SIGNATURE", &signature)
            .header("ACCESS-REQUEST-TIME", &request_time)
            .header("ACCESS-TIME-WINDOW", TIME_WINDOW_MS)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .context("Failed to reach order endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Order endpoint returned {}: {}", status, text);
        }

        let result: OrderResponse = response
            .json()
            .await
            .context("Failed to parse order response")?;

        if result.success != 1 {
            anyhow::bail!("Order rejected by exchange: {}", result.data);
        }

        Ok(result)
    }
}

/// HMAC-SHA256 over `timestamp + window + body`, lowercase hex.
fn sign_request(secret: &str, request_time: &str, time_window: &str, body: &str) -> String {
    let message = format!("{request_time}{time_window}{body}");

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_deterministic() {
        let body = r#"{"pair":"btc_jpy","amount":"0.006000","price":"4975000","side":"buy","type":"limit","post_only":true}"#;
        let first = sign_request("secret", "1700000000000", "5000", body);
        let second = sign_request("secret", "1700000000000", "5000", body);
        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = sign_request("secret", "1700000000000", "5000", "{}");
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_changes_with_any_preimage_part() {
        let base = sign_request("secret", "1700000000000", "5000", "{}");
        assert_ne!(base, sign_request("other", "1700000000000", "5000", "{}"));
        assert_ne!(base, sign_request("secret", "1700000000001", "5000", "{}"));
        assert_ne!(base, sign_request("secret", "1700000000000", "6000", "{}"));
        assert_ne!(base, sign_request("secret", "1700000000000", "5000", "[]"));
    }
}
