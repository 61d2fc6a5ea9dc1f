//! Response body normalization

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ClientError;
use crate::models::{CreateOutcome, CreateProductResponse};

/// Accepts `[...]` or `{ "<field>": [...] }`. Any other shape, including an
/// empty body or a wrapper without the field, is an empty collection.
/// Records that do not decode are skipped, not fatal.
pub(crate) fn collection<T: DeserializeOwned>(body: &str, field: &str) -> Result<Vec<T>, ClientError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(resource = field, index, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect())
}

pub(crate) fn create_outcome(body: &str) -> Result<CreateOutcome, ClientError> {
    if body.trim().is_empty() {
        return Ok(CreateOutcome::Refused { message: None });
    }
    serde_json::from_str::<CreateProductResponse>(body)
        .map(CreateOutcome::from)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// `message` field of a JSON error body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
