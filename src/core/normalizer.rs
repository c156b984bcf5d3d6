use crate::domain::model::Record;
use crate::utils::error::{HubError, Result};
use serde_json::Value;

/// Flatten `{ results: { category: [video, ...] } }` into one row per video.
///
/// Rows keep the backend's category order, then the order inside each
/// category. Each row gains a `category` field holding its mapping key.
pub fn normalize_youtube(payload: Value) -> Result<Vec<Record>> {
    let results = match take_field(payload, "results")? {
        Value::Object(results) => results,
        other => {
            return Err(HubError::MalformedPayload {
                message: format!("`results` must be an object, got {}", type_name(&other)),
            })
        }
    };

    let mut rows = Vec::new();
    for (category, videos) in results {
        let videos: Vec<Record> =
            serde_json::from_value(videos).map_err(|e| HubError::MalformedPayload {
                message: format!("category `{}`: {}", category, e),
            })?;

        tracing::debug!("Category '{}' contributed {} videos", category, videos.len());
        rows.extend(
            videos
                .into_iter()
                .map(|video| video.with_field("category", category.clone())),
        );
    }

    Ok(rows)
}

/// `{ items: [tweet, ...] }` is already flat; rows are returned as-is.
pub fn normalize_twitter(payload: Value) -> Result<Vec<Record>> {
    let items = take_field(payload, "items")?;
    serde_json::from_value(items).map_err(|e| HubError::MalformedPayload {
        message: format!("`items`: {}", e),
    })
}

fn take_field(payload: Value, field: &str) -> Result<Value> {
    match payload {
        Value::Object(mut map) => map.remove(field).ok_or_else(|| HubError::MalformedPayload {
            message: format!("missing `{}`", field),
        }),
        other => Err(HubError::MalformedPayload {
            message: format!("expected a JSON object, got {}", type_name(&other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
