use crate::application::stimulus::{ApiResponse, EscalationStimulus, TriageStimulus};
use crate::application::{escalation, triage, StageContext};
use crate::foundation::Result;
use log::info;

/// Routes a triage stimulus to the stage handler. The correlation field is
/// read and logged before branching; it never influences routing.
pub async fn dispatch_triage(ctx: &StageContext, stimulus: TriageStimulus) -> Result<Option<ApiResponse>> {
    info!(
        "dispatching triage stimulus kind={} ticket_id={} correlation_id={}",
        stimulus.kind(),
        stimulus.ticket_id().map(|id| id.as_str()).unwrap_or("-"),
        ctx.correlation()
    );
    triage::handle_triage(ctx, stimulus).await
}

/// Routes an escalation stimulus to the stage handler.
pub async fn dispatch_escalation(ctx: &StageContext, stimulus: EscalationStimulus) -> Result<Option<ApiResponse>> {
    info!(
        "escalating ticket kind={} ticket_id={} correlation_id={}",
        stimulus.kind(),
        stimulus.ticket_id(),
        ctx.correlation()
    );
    escalation::handle_escalation(ctx, stimulus).await
}
