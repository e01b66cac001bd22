use crate::foundation::TicketId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store namespace that holds all ticket records.
pub const TICKETS_NAMESPACE: &str = "tickets";

/// Status a ticket carries between creation and triage.
pub const STATUS_OPEN: &str = "open";

/// Priority set accepted on the manual triage request.
///
/// The `Ticket` entity and the queue payloads keep `priority` as an open
/// string; only this request-side type constrains it. See DESIGN.md.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a ticket acquired its triage fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriageMethod {
    Auto,
    Manual,
    AutoSweep,
}

impl fmt::Display for TriageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
            Self::AutoSweep => write!(f, "auto-sweep"),
        }
    }
}

/// How a ticket acquired its escalation fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationMethod {
    Auto,
    Manual,
}

impl fmt::Display for EscalationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// The sole persistent entity. Owned by the `TicketStore`; stage logic only
/// ever holds an ephemeral snapshot for the duration of one operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triaged_at_nanos: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_method: Option<TriageMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_at_nanos: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_method: Option<EscalationMethod>,
}

impl Ticket {
    /// True when the ticket has a non-empty assignee. The sweep treats an
    /// empty-string assignee the same as an absent one.
    pub fn has_assignee(&self) -> bool {
        self.assignee.as_deref().is_some_and(|assignee| !assignee.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_serializes_with_camel_case_wire_names() {
        let ticket = Ticket {
            id: TicketId::from("T-1"),
            title: "printer on fire".to_string(),
            priority: "high".to_string(),
            customer_email: Some("a@example.com".to_string()),
            status: STATUS_OPEN.to_string(),
            triage_method: Some(TriageMethod::AutoSweep),
            ..Ticket::default()
        };
        let value = serde_json::to_value(&ticket).expect("serialize ticket");
        assert_eq!(value["customerEmail"], "a@example.com");
        assert_eq!(value["triageMethod"], "auto-sweep");
        assert!(value.get("escalatedTo").is_none());
    }

    #[test]
    fn priority_round_trips_lowercase() {
        let priority: Priority = serde_json::from_str("\"critical\"").expect("parse priority");
        assert_eq!(priority, Priority::Critical);
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }

    #[test]
    fn empty_assignee_counts_as_unassigned() {
        let mut ticket = Ticket { assignee: Some(String::new()), ..Ticket::default() };
        assert!(!ticket.has_assignee());
        ticket.assignee = Some("support-pool".to_string());
        assert!(ticket.has_assignee());
    }
}
