// src/services/dispatcher.rs
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::services::content_fetcher::ObjectStore;
use crate::services::entity_detector::EntityDetector;
use crate::services::errors::PipelineError;
use crate::services::record_mapper::to_record;
use crate::services::record_writer::RecordStore;
use crate::services::types::{RunStats, S3Event, UploadNotification};

/// Drives the extraction pipeline over a batch of upload notifications.
///
/// Processing is strictly sequential: notifications in delivery order,
/// entities in detection order, one write awaited at a time. The first
/// failure aborts the remainder of the batch; records already written stay
/// written.
pub struct NotificationDispatcher {
    objects: Arc<dyn ObjectStore>,
    detector: Arc<dyn EntityDetector>,
    records: Arc<dyn RecordStore>,
    stats: Arc<RwLock<RunStats>>,
}

impl NotificationDispatcher {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        detector: Arc<dyn EntityDetector>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            objects,
            detector,
            records,
            stats: Arc::new(RwLock::new(RunStats::new())),
        }
    }

    /// Returns stats accumulated across all runs of this dispatcher.
    pub async fn get_stats(&self) -> RunStats {
        self.stats.read().await.clone()
    }

    pub async fn reset_stats(&self) {
        let mut stats = self.stats.write().await;
        *stats = RunStats::new();
    }

    async fn update_stats(&self, run: &RunStats) {
        let mut stats = self.stats.write().await;
        stats.add(run);
    }

    /// Processes every notification in a storage event envelope.
    pub async fn handle_event(&self, event: &S3Event) -> Result<RunStats, PipelineError> {
        self.run_batch(&event.notifications()).await
    }

    /// Processes one batch of notifications, aborting on the first failure.
    pub async fn run_batch(
        &self,
        notifications: &[UploadNotification],
    ) -> Result<RunStats, PipelineError> {
        let run_id = format!("run-{}", Uuid::new_v4());
        let start = Instant::now();
        let mut run_stats = RunStats::new();

        info!(
            "[{}] Processing batch of {} notifications",
            run_id,
            notifications.len()
        );

        for notification in notifications {
            info!(
                "[{}] File {} uploaded to bucket {}",
                run_id, notification.key, notification.bucket
            );

            if let Err(err) = self
                .process_notification(&run_id, notification, &mut run_stats)
                .await
            {
                error!(
                    "[{}] Aborting batch on {}: {}",
                    run_id, notification.key, err
                );
                run_stats.total_time_ms = start.elapsed().as_millis() as u64;
                self.update_stats(&run_stats).await;
                return Err(err);
            }

            run_stats.notifications_processed += 1;
        }

        run_stats.total_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "[{}] Batch complete: {} notifications, {} entities, {} records written in {:.2?}",
            run_id,
            run_stats.notifications_processed,
            run_stats.entities_detected,
            run_stats.records_written,
            start.elapsed()
        );
        self.update_stats(&run_stats).await;

        Ok(run_stats)
    }

    async fn process_notification(
        &self,
        run_id: &str,
        notification: &UploadNotification,
        stats: &mut RunStats,
    ) -> Result<(), PipelineError> {
        let fetch_start = Instant::now();
        let text = self
            .objects
            .fetch_text(&notification.bucket, &notification.key)
            .await?;
        stats.documents_fetched += 1;
        stats.fetch_time_ms += fetch_start.elapsed().as_millis() as u64;

        let detect_start = Instant::now();
        let entities = self.detector.detect_entities(&text).await?;
        stats.entities_detected += entities.len();
        stats.detect_time_ms += detect_start.elapsed().as_millis() as u64;

        info!(
            "[{}] Found {} entities in {}",
            run_id,
            entities.len(),
            notification.key
        );

        let write_start = Instant::now();
        // Writes go out one at a time so record order follows detection order.
        for entity in &entities {
            debug!(
                "[{}] Entity type={} text={} score={:?}",
                run_id, entity.category, entity.text, entity.score
            );
            let record = to_record(&notification.key, entity)?;
            self.records.put_record(&record).await?;
            stats.records_written += 1;
        }
        stats.write_time_ms += write_start.elapsed().as_millis() as u64;

        Ok(())
    }
}
