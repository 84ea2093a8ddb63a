//! Model catalog types for `GET /api/models`.
//!
//! The endpoint is a passthrough of the OpenRouter catalog: fields this
//! service does not interpret are preserved via `serde(flatten)` so clients
//! see the same document the upstream produced.

use serde::{Deserialize, Serialize};

/// One entry in the model catalog.
///
/// Only `id`, `name` and `context_length` are read by the frontends; the
/// rest of the upstream object (pricing, architecture, ...) rides along in
/// `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelInfo {
    /// Human-readable label, falling back to the id when the upstream
    /// provides no display name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Response body of `GET /api/models`, mirroring the upstream envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_upstream_fields_pass_through() {
        let info: ModelInfo = serde_json::from_value(json!({
            "id": "qwen/qwen-2.5-coder-32b-instruct:free",
            "name": "Qwen 2.5 Coder",
            "context_length": 32768,
            "pricing": {"prompt": "0", "completion": "0"}
        }))
        .unwrap();
        assert_eq!(info.display_name(), "Qwen 2.5 Coder");
        assert!(info.extra.contains_key("pricing"));

        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["pricing"]["prompt"], "0");
        assert_eq!(back["context_length"], 32768);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let info: ModelInfo = serde_json::from_value(json!({"id": "some/model"})).unwrap();
        assert_eq!(info.display_name(), "some/model");
    }
}
