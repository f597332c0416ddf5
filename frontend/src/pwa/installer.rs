use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, MouseEvent, Window};
use yew::Callback;

use super::flow::{InstallFlow, InstallHost, LocalTask};
use super::prompt::BeforeInstallPromptEvent;
use crate::components::install_banner::{InstallBannerProps, MountedBanner};
use crate::error::WebError;

/// Attribute marking page elements that re-open the install prompt.
pub const TRIGGER_ATTR: &str = "data-pwa-install";

pub type Installer = InstallFlow<BeforeInstallPromptEvent, BrowserHost>;

/// Mounts the Yew banner into the live document.
pub struct BrowserHost {
    document: Document,
}

impl InstallHost for BrowserHost {
    type Banner = MountedBanner;

    fn show_banner(
        &self,
        app_name: &str,
        on_install: Callback<()>,
        on_dismiss: Callback<()>,
    ) -> Result<MountedBanner, WebError> {
        let props = InstallBannerProps {
            app_name: app_name.to_string(),
            on_install: on_install.reform(|_: MouseEvent| ()),
            on_dismiss: on_dismiss.reform(|_: MouseEvent| ()),
        };
        MountedBanner::mount(&self.document, props)
    }

    fn hide_banner(&self, banner: MountedBanner) {
        banner.remove();
    }

    fn spawn(&self, task: LocalTask) {
        spawn_local(task);
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), WebError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn install(window: &Window, document: &Document, app_name: &str) -> Result<Rc<Installer>, WebError> {
    let host = BrowserHost { document: document.clone() };
    let installer = Installer::new(host, app_name.to_string());

    let on_offer = installer.clone();
    listen(window, "beforeinstallprompt", move |e| {
        e.prevent_default();
        on_offer.offer(e.unchecked_into());
    })?;

    let on_installed = installer.clone();
    listen(window, "appinstalled", move |_| on_installed.installed())?;

    let triggers = document.query_selector_all(&format!("[{}]", TRIGGER_ATTR))?;
    for i in 0..triggers.length() {
        let Some(trigger) = triggers.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let on_trigger = installer.clone();
        listen(&trigger, "click", move |e| {
            e.prevent_default();
            on_trigger.install();
        })?;
    }

    Ok(installer)
}
