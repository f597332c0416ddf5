use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::WebError;

/// Id of the optional `<script type="application/json">` blob that overrides
/// any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub app_name: String,
    pub service_worker_path: String,
    /// Scroll offset in pixels the header must exceed before it is elevated.
    pub header_shadow_threshold: f64,
    pub message_timeout_ms: u32,
    pub card_selector: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_name: "Healing Guru".to_string(),
            service_worker_path: "/static/sw.js".to_string(),
            header_shadow_threshold: 50.0,
            message_timeout_ms: 5_000,
            card_selector: ".service-card".to_string(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, WebError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the page, falling back to defaults when the blob
    /// is absent or malformed.
    pub fn from_document(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring site config: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_scripts() {
        let config = SiteConfig::default();
        assert_eq!(config.service_worker_path, "/static/sw.js");
        assert_eq!(config.header_shadow_threshold, 50.0);
        assert_eq!(config.message_timeout_ms, 5_000);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"app_name": "Calm Corner", "message_timeout_ms": 2500}"#)
            .unwrap();
        assert_eq!(config.app_name, "Calm Corner");
        assert_eq!(config.message_timeout_ms, 2_500);
        assert_eq!(config.card_selector, ".service-card");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, WebError::Config(_)));
    }
}
