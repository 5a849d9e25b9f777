// src/services/types.rs
use serde::{Deserialize, Serialize};

/// One file-arrival notification: the bucket and key of an uploaded object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadNotification {
    pub bucket: String,
    pub key: String,
}

/// One entity as returned by the detection service, in service order.
/// `score` is optional because the service response leaves it nullable;
/// the record mapper rejects entities without one.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedEntity {
    pub category: String,
    pub text: String,
    pub score: Option<f32>,
}

/// The persisted form of one detected entity. Identity is
/// (partition_key, sort_key); writing the same identity twice overwrites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRecord {
    /// "<object key>#<category>", grouping a file's entities by category.
    pub partition_key: String,
    /// The literal text the service recognized.
    pub sort_key: String,
    /// Confidence as decimal text, e.g. "0.97".
    pub confidence_score: String,
}

// Storage event envelope, matching the S3 notification JSON shape.
// Fields we do not consume (event name, timestamps, object size) are ignored.

#[derive(Clone, Debug, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3Event {
    /// Flattens the envelope into notifications, preserving delivery order.
    pub fn notifications(&self) -> Vec<UploadNotification> {
        self.records
            .iter()
            .map(|record| UploadNotification {
                bucket: record.s3.bucket.name.clone(),
                key: record.s3.object.key.clone(),
            })
            .collect()
    }
}

/// Counters and phase timings for one pipeline run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub notifications_processed: usize,
    pub documents_fetched: usize,
    pub entities_detected: usize,
    pub records_written: usize,
    pub fetch_time_ms: u64,
    pub detect_time_ms: u64,
    pub write_time_ms: u64,
    pub total_time_ms: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates another run's stats into this one.
    pub fn add(&mut self, other: &Self) {
        self.notifications_processed += other.notifications_processed;
        self.documents_fetched += other.documents_fetched;
        self.entities_detected += other.entities_detected;
        self.records_written += other.records_written;
        self.fetch_time_ms += other.fetch_time_ms;
        self.detect_time_ms += other.detect_time_ms;
        self.write_time_ms += other.write_time_ms;
        self.total_time_ms += other.total_time_ms;
    }
}
