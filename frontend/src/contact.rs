use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::error::WebError;

pub const FORM_ID: &str = "contactForm";
pub const MESSAGE_ID: &str = "formMessage";
pub const THANK_YOU: &str = "Thank you for your message! We will get back to you soon.";

// JavaScript's `\s` also covers U+FEFF; Rust's does not.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Field values as read at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Empty-string check only; whitespace-only values count as filled.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ContactError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Neutral,
    Error,
    Success,
}

impl MessageKind {
    pub fn class_name(self) -> &'static str {
        match self {
            MessageKind::Neutral => "form-message",
            MessageKind::Error => "form-message error",
            MessageKind::Success => "form-message success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: MessageKind,
    pub text: String,
    pub reset_form: bool,
}

/// Decides what the user sees after pressing submit. Sending is simulated, so
/// a valid submission always succeeds.
pub fn feedback_for(submission: &ContactSubmission) -> Feedback {
    match submission.validate() {
        Ok(()) => Feedback {
            kind: MessageKind::Success,
            text: THANK_YOU.to_string(),
            reset_form: true,
        },
        Err(e) => Feedback {
            kind: MessageKind::Error,
            text: e.to_string(),
            reset_form: false,
        },
    }
}

/// Where form feedback is written; `#formMessage` in the page.
pub trait MessageArea: Clone + 'static {
    fn set_text(&self, text: &str);
    fn set_class(&self, class: &str);
}

impl MessageArea for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_class(&self, class: &str) {
        self.set_class_name(class);
    }
}

/// Schedules the one-shot class revert. Dropping the returned handle must
/// cancel the revert.
pub trait RevertTimer {
    type Pending;

    fn schedule(&self, millis: u32, revert: Box<dyn FnOnce()>) -> Self::Pending;
}

pub struct GlooTimer;

impl RevertTimer for GlooTimer {
    type Pending = Timeout;

    fn schedule(&self, millis: u32, revert: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, revert)
    }
}

/// The message area plus its pending revert.
pub struct StatusMessage<A, T: RevertTimer> {
    area: A,
    timer: T,
    timeout_ms: u32,
    pending: Option<T::Pending>,
}

impl<A: MessageArea, T: RevertTimer> StatusMessage<A, T> {
    pub fn new(area: A, timer: T, timeout_ms: u32) -> Self {
        Self { area, timer, timeout_ms, pending: None }
    }

    pub fn show(&mut self, kind: MessageKind, text: &str) {
        self.area.set_text(text);
        self.area.set_class(kind.class_name());

        // Drop the older revert before arming a new one.
        self.pending = None;
        let area = self.area.clone();
        let revert = Box::new(move || area.set_class(MessageKind::Neutral.class_name()));
        self.pending = Some(self.timer.schedule(self.timeout_ms, revert));
    }

    pub fn has_pending_revert(&self) -> bool {
        self.pending.is_some()
    }
}

fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_submission(document: &Document) -> ContactSubmission {
    ContactSubmission {
        name: field_value(document, "name"),
        email: field_value(document, "email"),
        message: field_value(document, "message"),
    }
}

pub fn install(document: &Document, timeout_ms: u32) -> Result<(), WebError> {
    let form = document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        .ok_or(WebError::MissingElement("#contactForm"))?;
    let status = document
        .get_element_by_id(MESSAGE_ID)
        .map(|el| Rc::new(RefCell::new(StatusMessage::new(el, GlooTimer, timeout_ms))));

    let document = document.clone();
    let target = form.clone();
    let on_submit = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();

        let feedback = feedback_for(&read_submission(&document));
        match &status {
            Some(status) => status.borrow_mut().show(feedback.kind, &feedback.text),
            None => debug!("No #formMessage element, dropping: {}", feedback.text),
        }
        if feedback.reset_form {
            info!("Contact form accepted");
            target.reset();
        }
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
