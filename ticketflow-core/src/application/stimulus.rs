use crate::domain::{Priority, SlaBreached, TicketCreated};
use crate::foundation::TicketId;
use serde::{Deserialize, Serialize};

/// Manual triage request body (`POST /tickets/triage`). Priority is the one
/// place the closed enum applies.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTriage {
    pub ticket_id: TicketId,
    pub assignee: String,
    pub priority: Priority,
}

/// Manual escalation request body (`POST /tickets/escalate`).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEscalate {
    pub ticket_id: TicketId,
    pub reason: String,
}

/// The triage stage accepts exactly these stimulus kinds. Adding a kind here
/// forces every match over it to handle the new arm.
#[derive(Clone, Debug)]
pub enum TriageStimulus {
    /// `ticket::created` queue message.
    Queue(TicketCreated),
    /// Manual triage request from the API.
    Request(ManualTriage),
    /// Periodic sweep tick; carries no payload.
    Timer,
}

impl TriageStimulus {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Queue(_) => "queue",
            Self::Request(_) => "request",
            Self::Timer => "timer",
        }
    }

    /// Shared correlation field across payload shapes. The timer tick has none.
    pub fn ticket_id(&self) -> Option<&TicketId> {
        match self {
            Self::Queue(created) => Some(&created.ticket_id),
            Self::Request(request) => Some(&request.ticket_id),
            Self::Timer => None,
        }
    }
}

/// The escalation stage accepts exactly these stimulus kinds.
#[derive(Clone, Debug)]
pub enum EscalationStimulus {
    /// `ticket::sla-breached` queue message.
    Queue(SlaBreached),
    /// Manual escalation request from the API.
    Request(ManualEscalate),
}

impl EscalationStimulus {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Queue(_) => "queue",
            Self::Request(_) => "request",
        }
    }

    /// Shared correlation field; present on both kinds.
    pub fn ticket_id(&self) -> &TicketId {
        match self {
            Self::Queue(breach) => &breach.ticket_id,
            Self::Request(request) => &request.ticket_id,
        }
    }
}

/// Response surfaced to the request caller. Transport-agnostic here; the
/// service layer turns it into an HTTP response.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: 404, body: serde_json::json!({ "error": message.into() }) }
    }
}
