// Forbid unwrap() in production code to prevent panics on bad responses.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use harness::{HttpServiceClient, config::HarnessConfig, run_newlines_in_sql};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harness=info,scenario=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match HarnessConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Running newlines-in-SQL scenario against {} (dataset '{}')",
        config.server_url,
        config.scenario.dataset_id
    );

    let client = match HttpServiceClient::new(&config.server_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build client: {e}");
            std::process::exit(1);
        }
    };

    match run_newlines_in_sql(&client, &config.scenario).await {
        Ok(report) => {
            // The status string is the only thing written to stdout.
            println!("{}", report.status);
            std::process::exit(report.status.exit_code());
        }
        Err(e) => {
            tracing::error!("Scenario aborted: {e}");
            std::process::exit(1);
        }
    }
}
