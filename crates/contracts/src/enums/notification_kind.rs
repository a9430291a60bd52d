use serde::{Deserialize, Serialize};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// Modifier class applied next to `mobile-notification`
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "mobile-notification-success",
            NotificationKind::Error => "mobile-notification-error",
            NotificationKind::Info => "mobile-notification-info",
        }
    }

    /// Unknown codes fall back to `Info`
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }
}
