mod config;
mod enricher;
mod processor;
mod store;

use anyhow::{Context, Result};
use config::Config;
use platewatch_pipeline::{QueueClient, StageRunner};
use processor::TicketProcessor;
use std::sync::Arc;
use store::RegistryStore;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_tracing(&config.service.log_level);

    info!(
        service = %config.service.name,
        "Starting Platewatch registry stage"
    );

    config.queue.validate().context("Invalid queue configuration")?;

    // Initialize collaborator handles, one per stage lifetime
    let store = Arc::new(
        RegistryStore::new(&config.database)
            .await
            .context("Failed to initialize registry store")?,
    );

    if config.database.ensure_schema {
        store
            .ensure_schema()
            .await
            .context("Failed to ensure registry schema")?;
    }

    let queue = Arc::new(QueueClient::new(config.queue.clone()).await);

    let tickets_queue = queue.config().queues.tickets.clone();
    let runner = Arc::new(StageRunner::new("registry", queue.clone(), tickets_queue));

    let processor = Arc::new(TicketProcessor::new(store, queue));

    // Spawn the stage loop
    let runner_task = {
        let runner = runner.clone();
        tokio::spawn(async move {
            runner.run(processor).await;
        })
    };

    info!("Registry stage started");

    // Wait for shutdown signal
    shutdown_signal().await;

    info!("Shutting down registry stage");
    runner.shutdown();
    runner_task.await.context("Stage task panicked")?;

    info!("Registry stage stopped");

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
