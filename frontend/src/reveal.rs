use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::SiteConfig;
use crate::error::{skip_on_error, WebError};

const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Inline style values a card carries before and after it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: Option<&'static str>,
}

impl RevealStyle {
    pub const HIDDEN: RevealStyle = RevealStyle {
        opacity: "0",
        transform: "translateY(20px)",
        transition: Some(TRANSITION),
    };

    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: "1",
        transform: "translateY(0)",
        transition: None,
    };

    /// Style change for one observer notification. Leaving the viewport never
    /// hides a card again.
    pub fn on_intersection(is_intersecting: bool) -> Option<RevealStyle> {
        is_intersecting.then_some(RevealStyle::SHOWN)
    }

    fn apply(self, el: &HtmlElement) -> Result<(), WebError> {
        let style = el.style();
        style.set_property("opacity", self.opacity)?;
        style.set_property("transform", self.transform)?;
        if let Some(transition) = self.transition {
            style.set_property("transition", transition)?;
        }
        Ok(())
    }
}

pub fn install(document: &Document, config: &SiteConfig) -> Result<usize, WebError> {
    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let Some(style) = RevealStyle::on_intersection(entry.is_intersecting()) else {
                continue;
            };
            if let Ok(card) = entry.target().dyn_into::<HtmlElement>() {
                skip_on_error("card reveal", style.apply(&card));
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    let cards = document.query_selector_all(&config.card_selector)?;
    let mut observed = 0;
    for i in 0..cards.length() {
        let Some(card) = cards.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        RevealStyle::HIDDEN.apply(&card)?;
        observer.observe(&card);
        observed += 1;
    }
    debug!("Watching {} cards for reveal", observed);
    Ok(observed)
}
