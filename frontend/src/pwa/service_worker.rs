use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{ServiceWorkerRegistration, Window};

use crate::error::WebError;

/// `document.readyState` once the `load` event has already fired.
pub fn is_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

pub fn is_supported(window: &Window) -> bool {
    Reflect::has(&window.navigator(), &"serviceWorker".into()).unwrap_or(false)
}

/// Registers the worker script and returns the scope it controls.
pub async fn register(window: &Window, script_url: &str) -> Result<String, WebError> {
    if !is_supported(window) {
        return Err(WebError::ServiceWorkerUnsupported);
    }
    let promise = window.navigator().service_worker().register(script_url);
    let registration: ServiceWorkerRegistration = JsFuture::from(promise).await?.unchecked_into();
    Ok(registration.scope())
}

fn spawn_register(window: Window, script_url: String) {
    spawn_local(async move {
        match register(&window, &script_url).await {
            Ok(scope) => info!("ServiceWorker registered: {}", scope),
            Err(e) => warn!("ServiceWorker registration failed: {}", e),
        }
    });
}

/// Registers once the page has loaded. Never retried.
pub fn install(window: &Window, script_url: &str) -> Result<(), WebError> {
    if !is_supported(window) {
        info!("Service workers unsupported, skipping registration");
        return Ok(());
    }

    let already_loaded = window
        .document()
        .map_or(false, |d| is_loaded(&d.ready_state()));
    if already_loaded {
        spawn_register(window.clone(), script_url.to_string());
        return Ok(());
    }

    let window_clone = window.clone();
    let script_url = script_url.to_string();
    let on_load = Closure::once(move || spawn_register(window_clone, script_url));
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_complete_counts_as_loaded() {
        assert!(is_loaded("complete"));
        assert!(!is_loaded("interactive"));
        assert!(!is_loaded("loading"));
    }
}
