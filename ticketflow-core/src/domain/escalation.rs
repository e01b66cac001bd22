//! Escalation policy: where escalated tickets land and why.

pub const ESCALATION_TARGET: &str = "engineering-lead";

/// Reason recorded when an SLA breach event triggers escalation.
pub fn sla_breach_reason(age_minutes: u64) -> String {
    format!("SLA breach: {} minutes without resolution", age_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breach_reason_carries_the_age() {
        assert_eq!(sla_breach_reason(95), "SLA breach: 95 minutes without resolution");
    }
}
