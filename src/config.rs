use std::time::Duration;

use thiserror::Error;

// Default endpoints (overridable via env so tests can point at a stub server)
pub const DEFAULT_FGI_URL: &str = "https://api.alternative.me/fng/";
pub const DEFAULT_PUBLIC_URL: &str = "https://public.bitbank.cc";
pub const DEFAULT_PRIVATE_URL: &str = "https://api.bitbank.cc";

/// Weekly share of a 30,000 JPY monthly target
pub const DEFAULT_BASE_INVESTMENT_JPY: f64 = 30_000.0 / 4.0;

/// Fixed 2x applied on top of the computed lot size. Policy constant whose
/// numeric origin is external to this code; do not re-derive it.
pub const DEFAULT_QUANTITY_MULTIPLIER: f64 = 2.0;

/// bitbank rejects spot orders below this size
pub const DEFAULT_MIN_ORDER_SIZE_BTC: f64 = 0.0001;

pub const DEFAULT_PAIR: &str = "btc_jpy";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HTTP_ATTEMPTS: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime configuration, assembled from the environment once at startup.
///
/// Everything that was an embedded literal in earlier revisions (base
/// investment, endpoints, minimum size) lives here so tests can substitute
/// their own values.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub pair: String,
    pub fgi_url: String,
    pub public_url: String,
    pub private_url: String,
    pub base_investment_jpy: f64,
    pub quantity_multiplier: f64,
    pub min_order_size: f64,
    pub http_timeout: Duration,
    pub http_attempts: u32,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// `BITBANK_API_KEY` and `BITBANK_API_SECRET` are required; everything
    /// else falls back to the defaults above.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required("BITBANK_API_KEY")?;
        let api_secret = required("BITBANK_API_SECRET")?;

        Ok(Self {
            api_key,
            api_secret,
            pair: optional("DCA_PAIR").unwrap_or_else(|| DEFAULT_PAIR.to_string()),
            fgi_url: optional("FGI_API_URL").unwrap_or_else(|| DEFAULT_FGI_URL.to_string()),
            public_url: optional("BITBANK_PUBLIC_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            private_url: optional("BITBANK_PRIVATE_URL")
                .unwrap_or_else(|| DEFAULT_PRIVATE_URL.to_string()),
            base_investment_jpy: parsed("DCA_BASE_INVESTMENT_JPY", DEFAULT_BASE_INVESTMENT_JPY)?,
            quantity_multiplier: parsed("DCA_QUANTITY_MULTIPLIER", DEFAULT_QUANTITY_MULTIPLIER)?,
            min_order_size: parsed("DCA_MIN_ORDER_SIZE", DEFAULT_MIN_ORDER_SIZE_BTC)?,
            http_timeout: Duration::from_secs(parsed(
                "DCA_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            http_attempts: parsed("DCA_HTTP_ATTEMPTS", DEFAULT_HTTP_ATTEMPTS)?,
        })
    }

    /// Configuration for tests: stub endpoints, fixed credentials, defaults
    /// everywhere else.
    pub fn for_testing(fgi_url: &str, public_url: &str, private_url: &str) -> Self {
        Self {
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
            pair: DEFAULT_PAIR.to_string(),
            fgi_url: fgi_url.to_string(),
            public_url: public_url.to_string(),
            private_url: private_url.to_string(),
            base_investment_jpy: DEFAULT_BASE_INVESTMENT_JPY,
            quantity_multiplier: DEFAULT_QUANTITY_MULTIPLIER,
            min_order_size: DEFAULT_MIN_ORDER_SIZE_BTC,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            http_attempts: DEFAULT_HTTP_ATTEMPTS,
        }
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

fn parsed<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
        Err(_) => Ok(default),
    }
}
