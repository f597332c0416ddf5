use std::cell::RefCell;
use std::fmt;

use serde::Deserialize;

use crate::error::WebError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallOutcome::Accepted => write!(f, "User accepted the install prompt"),
            InstallOutcome::Dismissed => write!(f, "User dismissed the install prompt"),
        }
    }
}

/// A browser-supplied install prompt that was held back for later.
#[allow(async_fn_in_trait)]
pub trait InstallPrompt {
    /// Shows the native prompt and waits for the user's answer.
    async fn show(&self) -> Result<InstallOutcome, WebError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Idle,
    /// Handle held and banner on screen.
    Offered,
    Prompting,
    Resolved(InstallOutcome),
    Installed,
}

/// Owns the single deferred install prompt.
#[derive(Debug)]
pub struct InstallCoordinator<P> {
    deferred: Option<P>,
    phase: InstallPhase,
}

impl<P> Default for InstallCoordinator<P> {
    fn default() -> Self {
        Self { deferred: None, phase: InstallPhase::Idle }
    }
}

impl<P> InstallCoordinator<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> InstallPhase {
        self.phase
    }

    pub fn is_holding(&self) -> bool {
        self.deferred.is_some()
    }

    /// Stores a fresh offer, replacing any older one. Returns true when a
    /// banner should be shown, false when one is already up.
    pub fn capture(&mut self, prompt: P) -> bool {
        self.deferred = Some(prompt);
        if self.phase == InstallPhase::Offered {
            return false;
        }
        self.phase = InstallPhase::Offered;
        true
    }

    /// Takes the held prompt so it can be shown.
    pub fn consume(&mut self) -> Option<P> {
        let prompt = self.deferred.take()?;
        self.phase = InstallPhase::Prompting;
        Some(prompt)
    }

    pub fn clear(&mut self) {
        self.deferred = None;
    }

    /// "Later": banner goes away, the handle stays for an explicit trigger.
    pub fn dismiss(&mut self) {
        if self.phase == InstallPhase::Offered {
            self.phase = InstallPhase::Idle;
        }
    }

    pub fn resolve(&mut self, outcome: Option<InstallOutcome>) {
        self.clear();
        self.phase = match outcome {
            Some(outcome) => InstallPhase::Resolved(outcome),
            None => InstallPhase::Idle,
        };
    }

    pub fn installed(&mut self) {
        self.clear();
        self.phase = InstallPhase::Installed;
    }
}

/// Runs one install attempt with whatever prompt is held. `None` when there
/// was nothing to show.
pub async fn run_install<P: InstallPrompt>(
    coordinator: &RefCell<InstallCoordinator<P>>,
) -> Option<Result<InstallOutcome, WebError>> {
    // The borrow must end before awaiting; the prompt is owned from here on.
    let prompt = coordinator.borrow_mut().consume()?;
    let result = prompt.show().await;
    coordinator
        .borrow_mut()
        .resolve(result.as_ref().ok().copied());
    Some(result)
}
