//! Conversational request orchestrator
//!
//! The orchestrator owns the one piece of real logic in this crate: build a
//! bounded prompt from the session, dispatch it to the configured backend,
//! retry transient failures with a fixed delay, and always hand the caller
//! a displayable string. It never mutates the session and never propagates
//! an error; the chat shell can print whatever comes back.
//!
//! Availability is decided once per orchestrator: a startup probe moves it
//! from `Probing` to a terminal `Ready` or `Unavailable`. An unavailable
//! orchestrator short-circuits every `respond` call without touching the
//! network; starting a new chat rebuilds the orchestrator and probes again.

use crate::backends::{Backend, BackendError, SamplingParams};
use crate::config::OrchestratorConfig;
use crate::prompt;
use crate::session::Session;

use std::fmt;

/// Fixed reply returned while the backend is unavailable
pub const UNAVAILABLE_REPLY: &str =
    "The assistant's backend is not available right now. Please start it, then begin a new chat to reconnect.";

/// Availability of the backend behind an orchestrator
///
/// `Probing` only exists between construction and the startup probe; the
/// other two states are terminal for the orchestrator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    /// Startup connectivity check has not finished
    Probing,
    /// The backend answered the probe; requests will be dispatched
    Ready,
    /// The probe exhausted its attempts; requests short-circuit
    Unavailable,
}

impl fmt::Display for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probing => write!(f, "probing"),
            Self::Ready => write!(f, "ready"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Dispatches bounded conversational requests to a backend
pub struct Orchestrator {
    backend: Box<dyn Backend>,
    config: OrchestratorConfig,
    sampling: SamplingParams,
    state: BackendState,
}

impl Orchestrator {
    /// Create a new orchestrator in the `Probing` state
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend to dispatch to
    /// * `config` - History window and retry policy
    /// * `sampling` - Sampling parameters sent with every request
    pub fn new(
        backend: Box<dyn Backend>,
        config: OrchestratorConfig,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            backend,
            config,
            sampling,
            state: BackendState::Probing,
        }
    }

    /// Current availability state
    pub fn state(&self) -> BackendState {
        self.state
    }

    /// Whether the orchestrator will dispatch requests
    pub fn is_ready(&self) -> bool {
        self.state == BackendState::Ready
    }

    /// Name of the backend kind behind this orchestrator
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Runs the startup connectivity check
    ///
    /// Probes the backend up to `max_retries + 1` times with the configured
    /// delay between attempts, then pins the state to `Ready` or
    /// `Unavailable` for the orchestrator's lifetime. Calling again after
    /// the state is terminal is a no-op that reports the decided state.
    ///
    /// # Returns
    ///
    /// `true` when the backend is ready
    pub async fn probe(&mut self) -> bool {
        if self.state != BackendState::Probing {
            return self.state == BackendState::Ready;
        }

        let attempts = self.config.max_retries + 1;
        for attempt in 1..=attempts {
            match self.backend.probe().await {
                Ok(()) => {
                    tracing::info!("Backend '{}' is ready", self.backend.name());
                    self.state = BackendState::Ready;
                    return true;
                }
                Err(err) => {
                    tracing::warn!(
                        "Connectivity check attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        err
                    );
                    if attempt < attempts {
                        tokio::time::sleep(self.config.retry_delay()).await;
                    }
                }
            }
        }

        tracing::error!(
            "Backend '{}' unavailable after {} attempts",
            self.backend.name(),
            attempts
        );
        self.state = BackendState::Unavailable;
        false
    }

    /// Produces a displayable reply for a new utterance
    ///
    /// Assembles the bounded prompt from the last `history_window` turns,
    /// dispatches it, and retries transient failures up to `max_retries`
    /// times with the configured delay between attempts. The session is
    /// never modified; the caller appends both the user turn and the reply.
    ///
    /// Always returns a string: the trimmed backend reply on success, a
    /// human-readable error message otherwise.
    ///
    /// # Arguments
    ///
    /// * `session` - Conversation so far (read-only)
    /// * `utterance` - The new user message
    pub async fn respond(&self, session: &Session, utterance: &str) -> String {
        if self.state != BackendState::Ready {
            return UNAVAILABLE_REPLY.to_string();
        }

        let payload = prompt::build_prompt(session, utterance, self.config.history_window);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.backend.generate(&payload, &self.sampling).await {
                Ok(text) => {
                    tracing::debug!("Backend replied on attempt {}", attempt);
                    return text.trim().to_string();
                }
                Err(err) => {
                    tracing::warn!("Dispatch attempt {} failed: {}", attempt, err);
                    if !err.is_retryable() || attempt > self.config.max_retries {
                        return failure_reply(&err);
                    }
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
            }
        }
    }
}

/// Converts an exhausted failure into the string shown to the user
fn failure_reply(err: &BackendError) -> String {
    match err {
        BackendError::Connectivity(_) => {
            "I can't reach the model right now. Please check that the backend is running and try again."
                .to_string()
        }
        BackendError::Timeout { .. } => {
            "I'm taking longer than expected to respond. Please try again or rephrase your message."
                .to_string()
        }
        BackendError::Status { status, .. } => format!(
            "The model service returned an error (status {}). Please try again in a moment.",
            status
        ),
        BackendError::ModelLoad(_) => {
            "The fine-tuned model could not be loaded. Please check the adapter files and restart."
                .to_string()
        }
    }
}
