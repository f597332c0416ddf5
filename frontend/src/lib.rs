use log::info;
use wasm_bindgen::prelude::*;
use web_sys::window;

pub mod config;
pub mod contact;
pub mod error;
pub mod header;
pub mod navigation;
pub mod reveal;
pub mod components {
    pub mod install_banner;
}
pub mod pwa {
    pub mod coordinator;
    pub mod flow;
    pub mod installer;
    pub mod prompt;
    pub mod service_worker;
}

use config::SiteConfig;
use error::{skip_on_error, WebError};

/// One missing piece of the page never stops the rest.
fn report<T>(component: &str, result: Result<T, WebError>) {
    skip_on_error(component, result);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config::log_level())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::MissingElement("document"))?;
    let config = SiteConfig::from_document(&document);

    report("smooth scroll", navigation::install(&document));
    report("contact form", contact::install(&document, config.message_timeout_ms));
    report("header shadow", header::install(&window, &document, config.header_shadow_threshold));
    report("card reveal", reveal::install(&document, &config));
    report("install banner", pwa::installer::install(&window, &document, &config.app_name));
    report("service worker", pwa::service_worker::install(&window, &config.service_worker_path));

    info!("{} app loaded successfully!", config.app_name);
    Ok(())
}
