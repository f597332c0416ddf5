use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::error::WebError;

/// Something that can find page sections by id and bring them into view.
pub trait ScrollHost {
    type Section;

    fn find_section(&self, id: &str) -> Option<Self::Section>;
    fn scroll_to(&self, section: &Self::Section);
}

impl ScrollHost for Document {
    type Section = Element;

    fn find_section(&self, id: &str) -> Option<Element> {
        self.get_element_by_id(id)
    }

    fn scroll_to(&self, section: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Extracts the element id from an in-page link target (`"#contact"` -> `"contact"`).
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scrolls to the section with the given id. Returns whether anything moved.
pub fn scroll_to_section<H: ScrollHost>(host: &H, id: &str) -> bool {
    match host.find_section(id) {
        Some(section) => {
            host.scroll_to(&section);
            true
        }
        None => false,
    }
}

pub fn follow_fragment<H: ScrollHost>(host: &H, href: &str) -> bool {
    fragment_id(href).map_or(false, |id| scroll_to_section(host, id))
}

/// Callable from inline page buttons, e.g. `onclick="scrollToSection('services')"`.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section_js(section_id: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        scroll_to_section(&document, section_id);
    }
}

/// Hooks every `a[href^="#"]` so it animates instead of jumping.
pub fn install(document: &Document) -> Result<usize, WebError> {
    let anchors = document.query_selector_all("a[href^=\"#\"]")?;
    let count = anchors.length();

    for i in 0..count {
        let Some(anchor) = anchors.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let document = document.clone();
        let link = anchor.clone();
        let on_click = Closure::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            if !follow_fragment(&document, &href) {
                debug!("No section for link target {:?}", href);
            }
        }) as Box<dyn FnMut(Event)>);

        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    Ok(count as usize)
}
