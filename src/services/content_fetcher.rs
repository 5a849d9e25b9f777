// src/services/content_fetcher.rs
use std::time::Instant;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use tracing::debug;

use crate::services::errors::PipelineError;

// Object content access trait
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieves the object at (bucket, key) in full and decodes it as text.
    async fn fetch_text(&self, bucket: &str, key: &str) -> Result<String, PipelineError>;
}

/// Component for reading uploaded documents out of object storage.
///
/// Documents are expected to be small enough to buffer whole, so the entire
/// body is read into memory before decoding.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch_text(&self, bucket: &str, key: &str) -> Result<String, PipelineError> {
        let start = Instant::now();

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| classify_get_object_error(err, bucket, key))?;

        let body = output.body.collect().await.map_err(|err| {
            PipelineError::TransientIo(format!(
                "Failed to read body of s3://{}/{}: {}",
                bucket, key, err
            ))
        })?;
        let bytes = body.into_bytes();

        debug!(
            "Fetched {} bytes from s3://{}/{} in {:.2?}",
            bytes.len(),
            bucket,
            key,
            start.elapsed()
        );

        Ok(decode_body_text(&bytes))
    }
}

// Invalid UTF-8 sequences are replaced rather than failing the read.
fn decode_body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn classify_get_object_error(
    err: SdkError<GetObjectError>,
    bucket: &str,
    key: &str,
) -> PipelineError {
    match &err {
        SdkError::ServiceError(service_err) => {
            if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) {
                PipelineError::NotFound(format!("s3://{}/{}", bucket, key))
            } else if service_err.err().code() == Some("AccessDenied") {
                PipelineError::AccessDenied(format!("s3://{}/{}", bucket, key))
            } else {
                PipelineError::TransientIo(format!(
                    "S3 GetObject failed for s3://{}/{}: {}",
                    bucket, key, err
                ))
            }
        }
        _ => PipelineError::TransientIo(format!(
            "S3 GetObject failed for s3://{}/{}: {}",
            bucket, key, err
        )),
    }
}
