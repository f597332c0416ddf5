use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::Promise;

use super::coordinator::{InstallOutcome, InstallPrompt};
use crate::error::WebError;

#[wasm_bindgen]
extern "C" {
    /// Chromium's `beforeinstallprompt` event; not part of web-sys.
    #[wasm_bindgen(extends = web_sys::Event)]
    #[derive(Debug, Clone)]
    pub type BeforeInstallPromptEvent;

    #[wasm_bindgen(method, catch)]
    fn prompt(this: &BeforeInstallPromptEvent) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, getter, js_name = userChoice)]
    fn user_choice(this: &BeforeInstallPromptEvent) -> Promise;
}

#[derive(Deserialize)]
struct UserChoice {
    outcome: InstallOutcome,
}

impl InstallPrompt for BeforeInstallPromptEvent {
    async fn show(&self) -> Result<InstallOutcome, WebError> {
        self.prompt()?;
        let choice = JsFuture::from(self.user_choice()).await?;
        let choice: UserChoice = serde_wasm_bindgen::from_value(choice)?;
        Ok(choice.outcome)
    }
}
