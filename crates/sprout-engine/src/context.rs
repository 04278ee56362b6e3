//! Audio context lifecycle.
//!
//! The output context is created lazily on the first [`AudioContext::ensure_ready`]
//! call and only moves forward: `Uninitialized -> Suspended -> Running`.
//! Hosts with an autoplay policy open suspended and only allow a resume from
//! inside a user gesture, so a rejected resume is normal and simply retried
//! on the next call.

use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::AudioBackend;

/// State of the output context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextState {
    #[default]
    Uninitialized,
    Suspended,
    Running,
}

impl ContextState {
    /// Lowercase name used in logs and debug output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextState::Uninitialized => "uninitialized",
            ContextState::Suspended => "suspended",
            ContextState::Running => "running",
        }
    }
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle manager for one backend's output context.
#[derive(Debug, Clone, Default)]
pub struct AudioContext {
    state: ContextState,
    unavailable: bool,
}

impl AudioContext {
    /// Creates a manager with no context yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// True once the context is running.
    pub fn is_running(&self) -> bool {
        self.state == ContextState::Running
    }

    /// True when construction failed; no later call will retry it.
    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Opens the context if needed and tries to resume it.
    ///
    /// Returns true when the context is running. Never returns an error: a
    /// failed construction is logged once and disables the context for good,
    /// a rejected resume returns false and is tried again on the next call.
    pub fn ensure_ready<B: AudioBackend + ?Sized>(&mut self, backend: &mut B) -> bool {
        if self.unavailable {
            return false;
        }

        if self.state == ContextState::Uninitialized {
            match backend.open() {
                Ok(state) => {
                    debug!(state = %state, "audio output opened");
                    self.advance_to(state.max(ContextState::Suspended));
                }
                Err(e) => {
                    warn!(code = e.code(), error = %e, "audio output unavailable, sound disabled");
                    self.unavailable = true;
                    return false;
                }
            }
        }

        if self.state == ContextState::Suspended {
            match backend.resume() {
                Ok(()) => self.advance_to(ContextState::Running),
                Err(e) => {
                    debug!(error = %e, "resume rejected, waiting for the next gesture");
                    return false;
                }
            }
        }

        self.is_running()
    }

    fn advance_to(&mut self, state: ContextState) {
        if state > self.state {
            debug!(from = %self.state, to = %state, "audio context state change");
            self.state = state;
        }
    }
}
