use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::{sleep, Duration};

use crate::config::Config;
use crate::models::SentimentReading;

const INITIAL_BACKOFF_MS: u64 = 2000;

/// Client for the alternative.me Fear & Greed Index API
#[derive(Clone)]
pub struct FgiClient {
    client: Client,
    url: String,
    attempts: u32,
}

#[derive(Debug, Deserialize)]
struct FgiResponse {
    data: Vec<FgiEntry>,
}

#[derive(Debug, Deserialize)]
struct FgiEntry {
    value: String,
    value_classification: String,
}

impl FgiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.fgi_url.clone(),
            attempts: config.http_attempts.max(1),
        })
    }

    /// Fetch the most recent index reading.
    ///
    /// A single attempt by default; when configured for more, transient
    /// failures back off exponentially between tries.
    pub async fn fetch_latest(&self) -> Result<SentimentReading> {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match self.fetch_once().await {
                Ok(reading) => {
                    tracing::info!(
                        "Fear and Greed Index: {} ({})",
                        reading.score,
                        reading.classification
                    );
                    return Ok(reading);
                }
                Err(e) => {
                    last_error = Some(e);

                    if attempt < self.attempts {
                        let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt - 1);
                        tracing::warn!(
                            "Attempt {}/{} fetching FGI failed: {}. Retrying in {}ms...",
                            attempt,
                            self.attempts,
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

    async fn fetch_once(&self) -> Result<SentimentReading> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to reach FGI API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("FGI API returned {}", status);
        }

        let body: FgiResponse = response
            .json()
            .await
            .context("Failed to parse FGI response")?;

        let entry = body
            .data
            .first()
            .context("FGI response contained no data entries")?;

        let score: u32 = entry
            .value
            .parse()
            .with_context(|| format!("FGI value is not an integer: {:?}", entry.value))?;

        Ok(SentimentReading {
            score,
            classification: entry.value_classification.clone(),
            fetched_at: Utc::now(),
        })
    }
}
