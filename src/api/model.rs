//! Model identifiers and the models endpoint types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a model (e.g. "gpt-4", "whisper-1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub String);

impl ModelId {
    /// Wrap a model identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A model available through the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier
    pub id: ModelId,
    /// Creation time, seconds since the epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    /// Organization owning the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

/// List envelope used by the models and files endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Listed objects
    pub data: Vec<T>,
}

/// Response of a delete operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// ID of the deleted object
    pub id: String,
    /// Whether the deletion took effect
    pub deleted: bool,
}
