use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that end an inventory action before a usable envelope arrives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("form has no product_id")]
    MissingProductId,
    #[error("CSRF token meta tag is missing")]
    MissingCsrfToken,
}

impl ActionError {
    pub fn missing(what: impl Into<String>) -> Self {
        ActionError::MissingElement(what.into())
    }

    /// Wraps a thrown JS exception
    pub fn js(value: JsValue) -> Self {
        ActionError::Transport(format!("{value:?}"))
    }
}

impl From<gloo_net::Error> for ActionError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ActionError::Decode(e.to_string()),
            other => ActionError::Transport(other.to_string()),
        }
    }
}
