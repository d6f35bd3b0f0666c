//! Engine response shapes

use crate::error::{EngineError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply to `add`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddResponse {
    /// Id assigned to the stored record
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// One nearest-neighbour hit, in the order the engine ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub content: String,
    /// Similarity in [0, 1], higher is closer
    pub score: f64,
}

/// Reply to `search`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Envelope fields the engine adds to every reply
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode an engine reply into `T`.
///
/// A reply carrying `"success": false` is rejected even when it also
/// happens to match `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    let envelope: Envelope = serde_json::from_value(value.clone()).unwrap_or_default();
    if envelope.success == Some(false) {
        let reason = envelope
            .error
            .unwrap_or_else(|| "engine reported failure".to_string());
        return Err(EngineError::protocol(reason));
    }

    serde_json::from_value(value).map_err(|e| EngineError::protocol(e.to_string()))
}
