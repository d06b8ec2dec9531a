mod composer;
mod config;
mod languages;
mod mailer;
mod processor;
mod translator;

use anyhow::{Context, Result};
use composer::NotificationComposer;
use config::Config;
use mailer::Mailer;
use platewatch_pipeline::{QueueClient, StageRunner};
use processor::ViolationProcessor;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use translator::AwsTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_tracing(&config.service.log_level);

    info!(
        service = %config.service.name,
        "Starting Platewatch notifier stage"
    );

    config.queue.validate().context("Invalid queue configuration")?;

    // The language table must be complete before the stage starts.
    languages::init();

    // Initialize collaborator handles, one per stage lifetime
    let translator = AwsTranslator::new(&config.translation).await;
    let composer = NotificationComposer::new(translator);
    let mailer = Mailer::new(&config.smtp).context("Failed to initialize mailer")?;

    let queue = Arc::new(QueueClient::new(config.queue.clone()).await);

    let violations_queue = queue.config().queues.violations.clone();
    let runner = Arc::new(StageRunner::new("notifier", queue.clone(), violations_queue));

    let processor = Arc::new(ViolationProcessor::new(composer, mailer));

    // Spawn the stage loop
    let runner_task = {
        let runner = runner.clone();
        tokio::spawn(async move {
            runner.run(processor).await;
        })
    };

    info!("Notifier stage started");

    // Wait for shutdown signal
    shutdown_signal().await;

    info!("Shutting down notifier stage");
    runner.shutdown();
    runner_task.await.context("Stage task panicked")?;

    info!("Notifier stage stopped");

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
