//! Page configuration
//!
//! Defaults match the bakery server. A page can override any field with a
//! JSON block:
//!
//! ```html
//! <script type="application/json" id="inventory-config">
//!   {"route_base": "/inventory", "guard_double_submit": true}
//! </script>
//! ```

use contracts::domain::a001_inventory::routes::DEFAULT_ROUTE_BASE;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "inventory-config";

pub const DEFAULT_VIEWPORT_CONTENT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Prefix of every inventory endpoint
    pub route_base: String,
    /// `name` of the meta tag holding the CSRF token
    pub csrf_meta_name: String,
    /// How long a toast stays fully visible
    pub notification_visible_ms: u32,
    /// Fade-out time before a toast is removed
    pub notification_fade_ms: u32,
    /// Viewport content written by `prevent_zoom`
    pub viewport_content: String,
    /// Skip repeated submits while a request is in flight
    pub guard_double_submit: bool,
    pub log_level: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            route_base: DEFAULT_ROUTE_BASE.to_string(),
            csrf_meta_name: "csrf-token".to_string(),
            notification_visible_ms: 3000,
            notification_fade_ms: 500,
            viewport_content: DEFAULT_VIEWPORT_CONTENT.to_string(),
            guard_double_submit: true,
            log_level: "debug".to_string(),
        }
    }
}

impl InventoryConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parsed log level; unknown names mean `Debug`
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Debug)
    }

    /// Reads the optional `#inventory-config` block of the current document.
    ///
    /// Falls back to defaults when the block is missing or malformed.
    pub fn load_from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(raw) = raw else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}
