// src/services/record_mapper.rs
use crate::services::errors::PipelineError;
use crate::services::types::{DetectedEntity, EntityRecord};

/// Maps one detected entity to its persisted record.
///
/// The partition key is "<object key>#<category>" so all entities of one
/// category from one file land under a single partition; the sort key is the
/// entity's literal text. The confidence score is stored as decimal text in
/// its shortest round-trip form, so rewriting the same entity produces a
/// byte-identical value.
///
/// Entities with empty text or no score at all cannot form a valid record
/// and fail here, before any write is attempted.
pub fn to_record(object_key: &str, entity: &DetectedEntity) -> Result<EntityRecord, PipelineError> {
    if entity.text.is_empty() {
        return Err(PipelineError::MalformedEntity(format!(
            "Entity of category {} from object {} has empty text",
            entity.category, object_key
        )));
    }

    let score = entity.score.ok_or_else(|| {
        PipelineError::MalformedEntity(format!(
            "Entity '{}' of category {} from object {} has no confidence score",
            entity.text, entity.category, object_key
        ))
    })?;

    Ok(EntityRecord {
        partition_key: format!("{}#{}", object_key, entity.category),
        sort_key: entity.text.clone(),
        confidence_score: score.to_string(),
    })
}
