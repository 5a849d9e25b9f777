// src/lib.rs
pub mod services;

// Re-export common types for easier access
pub use services::dispatcher::NotificationDispatcher;
pub use services::errors::PipelineError;
pub use services::types::{DetectedEntity, EntityRecord, RunStats, S3Event, UploadNotification};
