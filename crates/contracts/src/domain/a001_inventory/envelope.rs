use serde::{Deserialize, Serialize};

/// Response body of every mutating inventory endpoint.
///
/// The server answers with this shape on 2xx as well as on 4xx/5xx,
/// so it is decoded regardless of the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Server message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Server message or the given fallback
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message().unwrap_or(fallback)
    }
}
