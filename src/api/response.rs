use crate::error::TaggerError;
use crate::types::{ContentId, Tag};
use serde::Deserialize;
use serde_json::Value;

// Only the first entry of each list is read; later entries may have any shape.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    uploaded: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TaggingResponse {
    results: Vec<Value>,
}

/// Extracts the id of the first uploaded file.
pub fn parse_upload_response(body: &[u8]) -> Result<ContentId, TaggerError> {
    let response: UploadResponse = serde_json::from_slice(body)
        .map_err(|e| TaggerError::MalformedResponse(format!("upload response: {}", e)))?;
    let first = response
        .uploaded
        .first()
        .ok_or_else(|| TaggerError::MalformedResponse("no uploaded files".to_string()))?;
    first
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| ContentId::new(id))
        .ok_or_else(|| TaggerError::MalformedResponse("missing content id".to_string()))
}

/// Extracts the tag strings of the first result, in service order.
///
/// Entries of `tags` are filtered one by one: anything that is not an
/// object with a string `tag` field is skipped, including non-object
/// entries, rather than rejecting the whole list.
pub fn parse_tagging_response(body: &[u8]) -> Result<Vec<Tag>, TaggerError> {
    let response: TaggingResponse = serde_json::from_slice(body)
        .map_err(|e| TaggerError::MalformedResponse(format!("tagging response: {}", e)))?;
    let first = response
        .results
        .first()
        .ok_or_else(|| TaggerError::MalformedResponse("no tagging results".to_string()))?;
    let tags = first
        .get("tags")
        .and_then(Value::as_array)
        .ok_or_else(|| TaggerError::MalformedResponse("missing tags".to_string()))?;
    Ok(tags
        .iter()
        .filter_map(|entry| entry.get("tag").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}
