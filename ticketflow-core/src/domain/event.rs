//! Queue topics and their payload shapes. Field names are the wire names.

use crate::foundation::TicketId;
use serde::{Deserialize, Serialize};

/// Consumed: emitted by the (external) ticket producer on creation.
pub const TOPIC_TICKET_CREATED: &str = "ticket::created";
/// Consumed: emitted by the (external) SLA monitor on breach.
pub const TOPIC_SLA_BREACHED: &str = "ticket::sla-breached";
/// Produced: emitted after every triage operation.
pub const TOPIC_TICKET_TRIAGED: &str = "ticket::triaged";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreated {
    pub ticket_id: TicketId,
    pub title: String,
    pub priority: String,
    pub customer_email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaBreached {
    pub ticket_id: TicketId,
    pub priority: String,
    pub title: String,
    pub age_minutes: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTriaged {
    pub ticket_id: TicketId,
    pub assignee: String,
    pub priority: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_use_camel_case_wire_names() {
        let created: TicketCreated = serde_json::from_value(serde_json::json!({
            "ticketId": "T-9",
            "title": "login broken",
            "priority": "high",
            "customerEmail": "b@example.com",
        }))
        .expect("parse ticket::created payload");
        assert_eq!(created.ticket_id.as_str(), "T-9");

        let triaged = TicketTriaged {
            ticket_id: TicketId::from("T-9"),
            assignee: "senior-support".to_string(),
            priority: "high".to_string(),
            title: "login broken".to_string(),
        };
        let value = serde_json::to_value(&triaged).expect("serialize ticket::triaged payload");
        assert_eq!(value["ticketId"], "T-9");
        assert_eq!(value["assignee"], "senior-support");
    }
}
