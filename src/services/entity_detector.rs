// src/services/entity_detector.rs
use std::time::Instant;

use async_trait::async_trait;
use aws_sdk_comprehend::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_comprehend::operation::detect_entities::DetectEntitiesError;
use aws_sdk_comprehend::types::LanguageCode;
use tracing::debug;

use crate::services::errors::PipelineError;
use crate::services::types::DetectedEntity;

// Entity detection trait
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Runs entity detection over one document's text, returning entities in
    /// the order the service produced them.
    async fn detect_entities(&self, text: &str) -> Result<Vec<DetectedEntity>, PipelineError>;
}

/// Component for extracting named entities from document text via the
/// Comprehend detection service. The language code is fixed per instance.
pub struct ComprehendDetector {
    client: aws_sdk_comprehend::Client,
    language_code: LanguageCode,
}

impl ComprehendDetector {
    pub fn new(client: aws_sdk_comprehend::Client) -> Self {
        Self::with_language(client, LanguageCode::En)
    }

    pub fn with_language(client: aws_sdk_comprehend::Client, language_code: LanguageCode) -> Self {
        Self {
            client,
            language_code,
        }
    }
}

#[async_trait]
impl EntityDetector for ComprehendDetector {
    async fn detect_entities(&self, text: &str) -> Result<Vec<DetectedEntity>, PipelineError> {
        // The service rejects empty documents; failing locally keeps the
        // edge case deterministic.
        if text.is_empty() {
            return Err(PipelineError::InvalidInput(
                "Cannot detect entities in an empty document".to_string(),
            ));
        }

        let start = Instant::now();

        let response = self
            .client
            .detect_entities()
            .text(text)
            .language_code(self.language_code.clone())
            .send()
            .await
            .map_err(classify_detect_error)?;

        let entities: Vec<DetectedEntity> = response
            .entities
            .unwrap_or_default()
            .into_iter()
            .map(|entity| DetectedEntity {
                category: entity
                    .r#type
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
                text: entity.text.unwrap_or_default(),
                score: entity.score,
            })
            .collect();

        debug!(
            "Detected {} entities in {} bytes of text in {:.2?}",
            entities.len(),
            text.len(),
            start.elapsed()
        );

        Ok(entities)
    }
}

fn classify_detect_error(err: SdkError<DetectEntitiesError>) -> PipelineError {
    match &err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            DetectEntitiesError::TextSizeLimitExceededException(_)
            | DetectEntitiesError::InvalidRequestException(_) => {
                PipelineError::InvalidInput(format!("DetectEntities rejected the request: {}", err))
            }
            DetectEntitiesError::InternalServerException(_) => {
                PipelineError::ServiceUnavailable(format!("DetectEntities failed: {}", err))
            }
            other => match other.code() {
                Some("ThrottlingException") | Some("TooManyRequestsException") => {
                    PipelineError::QuotaExceeded(format!("DetectEntities throttled: {}", err))
                }
                Some("UnsupportedLanguageException") => PipelineError::InvalidInput(format!(
                    "DetectEntities rejected the request: {}",
                    err
                )),
                _ => PipelineError::ServiceUnavailable(format!("DetectEntities failed: {}", err)),
            },
        },
        _ => PipelineError::ServiceUnavailable(format!("DetectEntities failed: {}", err)),
    }
}
