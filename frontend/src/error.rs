use log::debug;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("javascript error: {0}")]
    Js(String),

    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("no browser window available")]
    NoWindow,

    #[error("service workers are not supported in this browser")]
    ServiceWorkerUnsupported,

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unexpected install choice: {0}")]
    Choice(#[from] serde_wasm_bindgen::Error),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(text) => WebError::Js(text),
            None => WebError::Js(format!("{:?}", value)),
        }
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Logs a failed page step at debug level and moves on.
pub fn skip_on_error<T>(what: &str, result: Result<T, WebError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Skipping {}: {}", what, e);
            None
        }
    }
}
