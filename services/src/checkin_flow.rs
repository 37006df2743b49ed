//! Check-in protocol state machine.
//!
//! Models one check-in flow (one device/browser session) as an explicit state
//! machine, independent of any rendering technology. The machine is pure: it
//! never performs I/O itself. Transitions may emit a [`FlowCommand`] that the
//! driver executes (search the roster, submit the check-in) and feeds back as
//! an event.
//!
//! Protocol rules encoded here:
//! - a blank/whitespace query is a no-op and emits no command;
//! - every search carries a sequence number; results for anything but the
//!   latest sequence are discarded, so a slow early search can never
//!   overwrite a later one;
//! - in simple mode, selecting a participant submits immediately with an
//!   empty phone value; in standard mode a non-blank phone and an explicit
//!   submit are required;
//! - a submission without a session id and token fails locally with no
//!   command emitted;
//! - only one submission can be in flight; further submit requests while
//!   `Submitting` are ignored;
//! - `Reset` clears search/selection state but keeps the session context.

use serde::{Deserialize, Serialize};

/// Shown when the flow was opened without a session id and token.
pub const ACCESS_REQUIRED_MESSAGE: &str = "QR 코드를 통해 접속해주세요.";
/// Fallback when the server gives no usable reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "요청 실패";

/// Masked roster entry returned by participant search. Never carries the full
/// phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSearchItem {
    pub id: i64,
    pub name: String,
    pub phone_last4: String,
    pub baptismal_name: String,
    pub district: String,
}

/// Wire payload of `POST /api/checkin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    pub session_id: String,
    pub token: String,
    pub participant_id: i64,
    pub phone: String,
}

/// Outcome of a check-in submission, rendered to the user as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinResult {
    pub ok: bool,
    pub message: String,
}

impl CheckinResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// The session the flow was opened against. Both values come from the QR URL
/// or the short link; either may be absent when the page was reached directly.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub session_id: Option<String>,
    pub token: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            token: Some(token.into()),
        }
    }

    /// True when a submission is allowed to leave the device.
    pub fn is_complete(&self) -> bool {
        matches!(&self.session_id, Some(s) if !s.trim().is_empty())
            && matches!(&self.token, Some(t) if !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Waiting for a name query.
    Searching,
    /// Search results on screen; an empty list is a valid, displayable state.
    ResultsShown { results: Vec<ParticipantSearchItem> },
    /// A candidate is picked; standard mode waits here for the phone number.
    Selected {
        participant: ParticipantSearchItem,
        phone: String,
    },
    /// Exactly one submission in flight.
    Submitting { participant: ParticipantSearchItem },
    /// Terminal display of the outcome; `Reset` starts over.
    Result { outcome: CheckinResult },
}

#[derive(Debug, Clone)]
pub enum FlowEvent {
    SearchRequested { query: String },
    ResultsReceived {
        seq: u64,
        results: Vec<ParticipantSearchItem>,
    },
    ParticipantSelected { participant: ParticipantSearchItem },
    PhoneChanged { phone: String },
    SubmitRequested,
    SubmitCompleted { outcome: CheckinResult },
    Reset,
}

/// Effect for the driver to perform. Feeding the response back as
/// `ResultsReceived` / `SubmitCompleted` continues the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowCommand {
    Search { seq: u64, query: String },
    Submit { request: CheckinRequest },
}

#[derive(Debug)]
pub struct CheckinFlow {
    context: SessionContext,
    simple_mode: bool,
    state: FlowState,
    latest_seq: u64,
}

impl CheckinFlow {
    /// Opens a flow. `simple_mode` is loaded once at flow start and fixed for
    /// the flow's lifetime.
    pub fn new(context: SessionContext, simple_mode: bool) -> Self {
        Self {
            context,
            simple_mode,
            state: FlowState::Searching,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn simple_mode(&self) -> bool {
        self.simple_mode
    }

    /// Sequence number of the most recently issued search.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Applies one event and returns the command the driver must run, if any.
    pub fn handle(&mut self, event: FlowEvent) -> Option<FlowCommand> {
        match event {
            FlowEvent::SearchRequested { query } => self.on_search_requested(&query),
            FlowEvent::ResultsReceived { seq, results } => self.on_results_received(seq, results),
            FlowEvent::ParticipantSelected { participant } => self.on_selected(participant),
            FlowEvent::PhoneChanged { phone } => {
                if let FlowState::Selected { phone: current, .. } = &mut self.state {
                    *current = phone;
                }
                None
            }
            FlowEvent::SubmitRequested => self.on_submit_requested(),
            FlowEvent::SubmitCompleted { outcome } => {
                if matches!(self.state, FlowState::Submitting { .. }) {
                    self.state = FlowState::Result { outcome };
                }
                None
            }
            FlowEvent::Reset => self.on_reset(),
        }
    }

    fn on_search_requested(&mut self, query: &str) -> Option<FlowCommand> {
        if !matches!(
            self.state,
            FlowState::Searching | FlowState::ResultsShown { .. }
        ) {
            return None;
        }
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.state = FlowState::Searching;
        Some(FlowCommand::Search {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    fn on_results_received(
        &mut self,
        seq: u64,
        results: Vec<ParticipantSearchItem>,
    ) -> Option<FlowCommand> {
        if seq != self.latest_seq {
            // stale response from an earlier search
            return None;
        }
        if matches!(
            self.state,
            FlowState::Searching | FlowState::ResultsShown { .. }
        ) {
            self.state = FlowState::ResultsShown { results };
        }
        None
    }

    fn on_selected(&mut self, participant: ParticipantSearchItem) -> Option<FlowCommand> {
        if !matches!(self.state, FlowState::ResultsShown { .. }) {
            return None;
        }
        if self.simple_mode {
            // selection itself is the submission
            self.begin_submit(participant, String::new())
        } else {
            self.state = FlowState::Selected {
                participant,
                phone: String::new(),
            };
            None
        }
    }

    fn on_submit_requested(&mut self) -> Option<FlowCommand> {
        match &self.state {
            FlowState::Selected { participant, phone } => {
                let phone = phone.trim().to_string();
                if phone.is_empty() {
                    return None;
                }
                let participant = participant.clone();
                self.begin_submit(participant, phone)
            }
            // a submission is already in flight
            FlowState::Submitting { .. } => None,
            _ => None,
        }
    }

    fn begin_submit(
        &mut self,
        participant: ParticipantSearchItem,
        phone: String,
    ) -> Option<FlowCommand> {
        if !self.context.is_complete() {
            self.state = FlowState::Result {
                outcome: CheckinResult::failure(ACCESS_REQUIRED_MESSAGE),
            };
            return None;
        }
        let request = CheckinRequest {
            session_id: self.context.session_id.clone().unwrap_or_default(),
            token: self.context.token.clone().unwrap_or_default(),
            participant_id: participant.id,
            phone,
        };
        self.state = FlowState::Submitting { participant };
        Some(FlowCommand::Submit { request })
    }

    fn on_reset(&mut self) -> Option<FlowCommand> {
        match self.state {
            FlowState::ResultsShown { .. }
            | FlowState::Selected { .. }
            | FlowState::Result { .. } => {
                self.state = FlowState::Searching;
                // invalidate any search still in flight
                self.latest_seq += 1;
                None
            }
            _ => None,
        }
    }
}

/// Interprets the raw submit response into a renderable result.
///
/// A 2xx body is parsed as [`CheckinResult`]; a non-2xx body yields its
/// `message` field when it parses as JSON. Anything unparsable falls back to
/// the generic failure message. Never panics on garbage input.
pub fn interpret_submit_response(status_ok: bool, body: &str) -> CheckinResult {
    if status_ok {
        return serde_json::from_str::<CheckinResult>(body)
            .unwrap_or_else(|_| CheckinResult::failure(GENERIC_FAILURE_MESSAGE));
    }
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    CheckinResult::failure(message)
}
