// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_sdk_comprehend::types::LanguageCode;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use entity_indexer_lib::services::config::PipelineConfig;
use entity_indexer_lib::services::content_fetcher::S3ObjectStore;
use entity_indexer_lib::services::dispatcher::NotificationDispatcher;
use entity_indexer_lib::services::entity_detector::ComprehendDetector;
use entity_indexer_lib::services::record_writer::DynamoRecordStore;
use entity_indexer_lib::services::types::S3Event;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize the tracing subscriber with env filter
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting entity extraction pipeline");

    let config = PipelineConfig::from_env()?;
    info!(
        "Writing entity records to table {} (language {})",
        config.table_name, config.language_code
    );

    let event_path = std::env::args()
        .nth(1)
        .context("Usage: entity_indexer <event.json>")?;
    let event_json = std::fs::read_to_string(&event_path)
        .with_context(|| format!("Failed to read event file {}", event_path))?;
    let event: S3Event = serde_json::from_str(&event_json)
        .with_context(|| format!("Failed to parse event file {}", event_path))?;
    info!(
        "Loaded event with {} records from {}",
        event.records.len(),
        event_path
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(endpoint) = config.endpoint.as_deref() {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    // Service clients are built once per process and shared by reference.
    let objects = Arc::new(S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config)));
    let detector = Arc::new(ComprehendDetector::with_language(
        aws_sdk_comprehend::Client::new(&sdk_config),
        LanguageCode::from(config.language_code.as_str()),
    ));
    let records = Arc::new(DynamoRecordStore::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.table_name.clone(),
    ));

    let dispatcher = NotificationDispatcher::new(objects, detector, records);

    match dispatcher.handle_event(&event).await {
        Ok(stats) => {
            info!(
                "Pipeline run succeeded: {} notifications, {} records written in {}ms",
                stats.notifications_processed, stats.records_written, stats.total_time_ms
            );
            Ok(())
        }
        Err(err) => {
            error!("Pipeline run failed: {}", err);
            Err(err.into())
        }
    }
}
