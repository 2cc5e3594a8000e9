//! Session state and the turn submission state machine.
//!
//! All mutation funnels through two transitions: [`ChatSession::begin_submission`]
//! appends a pending turn and hands the caller the payload to send;
//! [`ChatSession::finish_submission`] merges the settled outcome back in.
//! The rendering layer only reads this state, it never owns any of its own
//! beyond scroll position.

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{resolve_reply, TransportError};
use crate::core::message::{Turn, SERVER_ERROR_TEXT};
use crate::core::transcript::Transcript;

/// Why a call to `begin_submission` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// The draft was empty after trimming whitespace.
    EmptyDraft,
    /// A previous submission has not settled yet. The UI disables the input
    /// while in flight, but the guard lives here so a caller bypassing the
    /// UI cannot start overlapping requests.
    InFlight,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    pub transcript: Transcript,
    input: String,
    in_flight: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Accept the current draft for submission: mark the session in flight,
    /// append a pending turn, and return the text to send. Rejects empty
    /// drafts and re-entry while a request is outstanding.
    pub fn begin_submission(&mut self) -> Result<String, SubmitRejection> {
        if self.in_flight {
            return Err(SubmitRejection::InFlight);
        }
        if self.input.trim().is_empty() {
            return Err(SubmitRejection::EmptyDraft);
        }

        let payload = self.input.clone();
        self.in_flight = true;
        self.transcript.append(Turn::pending(&payload));
        debug!(chars = payload.len(), "submission accepted");
        Ok(payload)
    }

    /// Merge a settled request back into the transcript.
    ///
    /// A JSON payload (success or error-shaped) resolves the pending turn in
    /// place and clears the draft. A transport failure also resolves the
    /// pending turn in place, with the fixed server-error text, but keeps the
    /// draft so the user can resend it unchanged.
    ///
    /// Note on the transport path: the original behavior this client replaces
    /// appended the server-error turn as a sibling, stranding the pending
    /// placeholder in the transcript. That looked like an oversight rather
    /// than intent, so the pending turn is replaced here too; the transcript
    /// never holds a pending turn once its request has settled.
    pub fn finish_submission(&mut self, user_text: &str, outcome: Result<Value, TransportError>) {
        let resolved = match outcome {
            Ok(payload) => {
                let reply = resolve_reply(&payload);
                self.input.clear();
                Turn::resolved(user_text, reply)
            }
            Err(err) => {
                warn!(error = %err, "chat request failed");
                Turn::resolved(user_text, SERVER_ERROR_TEXT)
            }
        };

        if self.transcript.replace_last(resolved).is_err() {
            // Unreachable through begin_submission, which always appends
            // the pending turn first.
            warn!("settled a submission against an empty transcript");
        }
        self.in_flight = false;
    }

    /// At most one turn may be pending, and only while a request is in
    /// flight.
    #[cfg(test)]
    fn pending_count(&self) -> usize {
        self.transcript.iter().filter(|t| t.is_pending()).count()
    }
}
