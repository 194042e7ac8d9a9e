use anyhow::Result;

use crate::api::{BitbankClient, FgiClient};
use crate::config::Config;
use crate::models::{OrderRequest, RunOutcome};
use crate::strategy::{investment_for_score, limit_price, order_quantity};

/// One DCA run: fetch sentiment, fetch price, size the buy, place the order.
///
/// Strictly sequential; the first fetch failure propagates before any call
/// to the private order endpoint. Nothing carries over between runs.
pub async fn run_dca(
    config: &Config,
    fgi: &FgiClient,
    bitbank: &BitbankClient,
    dry_run: bool,
) -> Result<RunOutcome> {
    let sentiment = fgi.fetch_latest().await?;
    let ticker = bitbank.get_ticker(&config.pair).await?;

    let limit = limit_price(ticker.last);
    let investment = investment_for_score(sentiment.score, config.base_investment_jpy);
    let quantity = order_quantity(investment, limit, config.quantity_multiplier);

    tracing::info!(
        "Order plan: {} BTC @ {} JPY ({} JPY budget, FGI {})",
        quantity,
        limit,
        investment,
        sentiment.score
    );

    if quantity < config.min_order_size {
        tracing::warn!(
            "Order skipped: {} below minimum size ({})",
            quantity,
            config.min_order_size
        );
        return Ok(RunOutcome::SkippedBelowMinimum { quantity });
    }

    let order = OrderRequest::limit_buy(&config.pair, quantity, limit);

    if dry_run {
        tracing::info!(
            "Dry run: would submit {}",
            serde_json::to_string(&order).unwrap_or_default()
        );
        return Ok(RunOutcome::DryRun {
            quantity,
            limit_price: limit,
        });
    }

    let response = bitbank.submit_order(&order).await?;
    tracing::info!("Order accepted: {}", response.data);

    Ok(RunOutcome::Placed {
        quantity,
        limit_price: limit,
    })
}
