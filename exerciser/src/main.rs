use api_exerciser::{run_until, ExerciserConfig};
use replay_log::HyperHttpClient;
use std::{future, process, sync::Arc};
use tokio::signal;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ExerciserConfig::from_env();
    let http_client = Arc::new(HyperHttpClient::new());

    let code = run_until(&config, http_client, wait_for_interrupt()).await;
    if code != 0 {
        process::exit(code);
    }
}

async fn wait_for_interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Unable to listen for the interrupt signal: {}", e);
        future::pending::<()>().await;
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_exerciser=info,replay_log=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
