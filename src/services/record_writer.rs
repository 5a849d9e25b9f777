// src/services/record_writer.rs
use std::time::Instant;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::services::errors::PipelineError;
use crate::services::types::EntityRecord;

/// Attribute names in the entity table.
pub const ATTR_ENTITY_TYPE: &str = "entity_type";
pub const ATTR_ENTITY_NAME: &str = "entity_name";
pub const ATTR_CONFIDENCE_SCORE: &str = "confidence_score";

// Record persistence trait
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upserts one record; an existing record with the same keys is
    /// overwritten.
    async fn put_record(&self, record: &EntityRecord) -> Result<(), PipelineError>;
}

/// Component for persisting entity records into the target table.
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_record(&self, record: &EntityRecord) -> Result<(), PipelineError> {
        if record.partition_key.is_empty() || record.sort_key.is_empty() {
            return Err(PipelineError::ValidationFailed(
                "Record keys must be non-empty".to_string(),
            ));
        }

        let start = Instant::now();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(
                ATTR_ENTITY_TYPE,
                AttributeValue::S(record.partition_key.clone()),
            )
            .item(
                ATTR_ENTITY_NAME,
                AttributeValue::S(record.sort_key.clone()),
            )
            .item(
                ATTR_CONFIDENCE_SCORE,
                AttributeValue::S(record.confidence_score.clone()),
            )
            .send()
            .await
            .map_err(|err| classify_put_item_error(err, &self.table_name))?;

        debug!(
            "Wrote record {} / {} in {:.2?}",
            record.partition_key,
            record.sort_key,
            start.elapsed()
        );

        Ok(())
    }
}

fn classify_put_item_error(err: SdkError<PutItemError>, table_name: &str) -> PipelineError {
    match &err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            PutItemError::ProvisionedThroughputExceededException(_)
            | PutItemError::RequestLimitExceeded(_) => {
                PipelineError::Throttled(format!("PutItem to {} throttled: {}", table_name, err))
            }
            PutItemError::ResourceNotFoundException(_) => {
                PipelineError::NotFound(format!("Table {}", table_name))
            }
            PutItemError::ItemCollectionSizeLimitExceededException(_) => {
                PipelineError::QuotaExceeded(format!("PutItem to {}: {}", table_name, err))
            }
            other => match other.code() {
                Some("ValidationException") => PipelineError::ValidationFailed(format!(
                    "PutItem to {} rejected: {}",
                    table_name, err
                )),
                Some("ThrottlingException") => PipelineError::Throttled(format!(
                    "PutItem to {} throttled: {}",
                    table_name, err
                )),
                _ => {
                    PipelineError::TransientIo(format!("PutItem to {} failed: {}", table_name, err))
                }
            },
        },
        _ => PipelineError::TransientIo(format!("PutItem to {} failed: {}", table_name, err)),
    }
}
