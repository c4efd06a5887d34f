/*
[INPUT]:  Storage and REST error payloads
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When response shapes change
*/

use serde::{Deserialize, Serialize};

/// Body returned by a successful object upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Error body from either the table API or storage.
///
/// Table errors look like `{code, message, details, hint}`, storage errors
/// like `{statusCode, error, message}`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Storage sends this as a string, some gateways as a number
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Best human-readable message, `None` when the body carries none
    pub fn into_message(self) -> Option<String> {
        let base = self.message.or(self.error)?;
        Some(match self.details {
            Some(details) if !details.is_empty() => format!("{base} ({details})"),
            _ => base,
        })
    }
}
