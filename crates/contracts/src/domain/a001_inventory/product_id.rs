use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier exactly as the page carries it
/// (`data-product-id`, hidden input or script argument).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Id of a submitted form field, trimmed for use in a URL path.
    /// Returns `None` for missing or blank values.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a single URL path segment
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}
