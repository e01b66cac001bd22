//! Triage policy: who picks up a ticket, and the sweep's event fallbacks.

pub const SENIOR_SUPPORT: &str = "senior-support";
pub const SUPPORT_POOL: &str = "support-pool";

pub const SWEEP_FALLBACK_PRIORITY: &str = "medium";
pub const SWEEP_FALLBACK_TITLE: &str = "unknown";

/// Routing rule for automatic triage. Priorities outside the known set fall
/// through to the pool, matching the open-string typing of queue payloads.
pub fn assignee_for_priority(priority: &str) -> &'static str {
    if priority == "critical" || priority == "high" {
        SENIOR_SUPPORT
    } else {
        SUPPORT_POOL
    }
}

/// Priority the sweep reports downstream when the stored one is missing.
pub fn sweep_event_priority(priority: &str) -> String {
    if priority.is_empty() {
        SWEEP_FALLBACK_PRIORITY.to_string()
    } else {
        priority.to_string()
    }
}

/// Title the sweep reports downstream when the stored one is missing.
pub fn sweep_event_title(title: &str) -> String {
    if title.is_empty() {
        SWEEP_FALLBACK_TITLE.to_string()
    } else {
        title.to_string()
    }
}
