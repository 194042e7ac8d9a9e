use clap::Parser;
use dcabot::api::{BitbankClient, FgiClient};
use dcabot::config::Config;
use dcabot::execution::run_dca;
use dcabot::models::RunOutcome;

/// Sentiment-weighted DCA bot for bitbank btc_jpy.
///
/// Runs one buy cycle per invocation; schedule it externally (cron or a
/// systemd timer, weekly).
#[derive(Parser, Debug)]
#[command(name = "dcabot", version)]
struct Cli {
    /// Compute and log the order without submitting it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let (fgi, bitbank) = match build_clients(&config) {
        Ok(clients) => clients,
        Err(e) => {
            tracing::error!("Failed to build HTTP clients: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Starting DCA run: pair={}, base={} JPY{}",
        config.pair,
        config.base_investment_jpy,
        if cli.dry_run { " (dry run)" } else { "" }
    );

    // Every run-level failure is logged and swallowed: the scheduler sees a
    // clean exit whether or not an order went out.
    match run_dca(&config, &fgi, &bitbank, cli.dry_run).await {
        Ok(RunOutcome::Placed {
            quantity,
            limit_price,
        }) => {
            tracing::info!("Run complete: placed {} BTC @ {}", quantity, limit_price);
        }
        Ok(RunOutcome::SkippedBelowMinimum { quantity }) => {
            tracing::info!("Run complete: skipped (quantity {} below minimum)", quantity);
        }
        Ok(RunOutcome::DryRun {
            quantity,
            limit_price,
        }) => {
            tracing::info!("Dry run complete: {} BTC @ {}", quantity, limit_price);
        }
        Err(e) => {
            tracing::error!("Run abandoned: {:#}", e);
        }
    }

    std::process::ExitCode::SUCCESS
}

fn build_clients(config: &Config) -> anyhow::Result<(FgiClient, BitbankClient)> {
    Ok((FgiClient::new(config)?, BitbankClient::new(config)?))
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dcabot=info".into()),
        )
        .init();
}
