mod client;
mod config;
mod submit;
mod types;
mod ui;
mod view;

use clap::Parser;

use client::{HttpPredictionClient, PredictionClient};
use config::Config;
use submit::submit;
use ui::TerminalUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,churnscope=info".into()),
        )
        .init();

    let config = Config::parse();
    tracing::debug!("Starting churnscope with config: {:?}", config);

    let client = HttpPredictionClient::new(&config.endpoint);

    if config.health {
        let report = client.health().await?;
        println!(
            "status: {}  model loaded: {}  features: {}",
            report.status, report.model_loaded, report.features_count
        );
        return Ok(());
    }

    let form = config.collect_form()?;
    if form.fields.is_empty() {
        anyhow::bail!("At least one --field or --input must be provided");
    }

    let ui = TerminalUi::new();
    if submit(&client, &ui, form).await.is_err() {
        // Already surfaced through the UI, only the exit status is left.
        std::process::exit(1);
    }
    Ok(())
}
