//! Request helpers shared by inventory actions
//!
//! Header names and the typed request description handed to a transport.

use contracts::domain::a001_inventory::FormFields;

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_XHR: &str = "XMLHttpRequest";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Body of an outbound `POST`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Sent as `multipart/form-data`
    Form(FormFields),
    Empty,
}

/// A `POST` the controller wants sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub body: RequestBody,
    pub headers: Vec<(&'static str, String)>,
}

impl OutboundRequest {
    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            url: url.into(),
            body,
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
