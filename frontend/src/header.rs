use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::error::{skip_on_error, WebError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderShadow {
    Flat,
    Elevated,
}

impl HeaderShadow {
    /// Elevated only once the page has scrolled strictly past `threshold`.
    pub fn for_offset(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            HeaderShadow::Elevated
        } else {
            HeaderShadow::Flat
        }
    }

    pub fn box_shadow(self) -> &'static str {
        match self {
            HeaderShadow::Flat => "0 2px 5px rgba(0, 0, 0, 0.1)",
            HeaderShadow::Elevated => "0 4px 10px rgba(0, 0, 0, 0.2)",
        }
    }
}

fn apply(window: &Window, document: &Document, threshold: f64) {
    let Some(header) = document
        .query_selector("header")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    if let Ok(scroll_y) = window.scroll_y() {
        let shadow = HeaderShadow::for_offset(scroll_y, threshold);
        let result = header.style().set_property("box-shadow", shadow.box_shadow());
        skip_on_error("header shadow", result.map_err(WebError::from));
    }
}

pub fn install(window: &Window, document: &Document, threshold: f64) -> Result<(), WebError> {
    let window_clone = window.clone();
    let document = document.clone();
    let scroll_callback = Closure::wrap(Box::new(move || {
        apply(&window_clone, &document, threshold);
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref())?;
    scroll_callback.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_exclusive() {
        assert_eq!(HeaderShadow::for_offset(49.0, 50.0), HeaderShadow::Flat);
        assert_eq!(HeaderShadow::for_offset(50.0, 50.0), HeaderShadow::Flat);
        assert_eq!(HeaderShadow::for_offset(51.0, 50.0), HeaderShadow::Elevated);
    }

    #[test]
    fn top_of_page_is_flat() {
        let shadow = HeaderShadow::for_offset(0.0, 50.0);
        assert_eq!(shadow.box_shadow(), "0 2px 5px rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn same_offset_gives_same_shadow() {
        let first = HeaderShadow::for_offset(400.0, 50.0);
        let again = HeaderShadow::for_offset(400.0, 50.0);
        assert_eq!(first, again);
        assert_eq!(first.box_shadow(), "0 4px 10px rgba(0, 0, 0, 0.2)");
    }
}
