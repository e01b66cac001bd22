use crate::application::patch::write_patched;
use crate::application::stimulus::{ApiResponse, EscalationStimulus, ManualEscalate};
use crate::application::StageContext;
use crate::domain::{sla_breach_reason, EscalationMethod, SlaBreached, Ticket, ESCALATION_TARGET, TICKETS_NAMESPACE};
use crate::foundation::{now_nanos, Result, TicketId};
use log::{debug, info, warn};

/// Escalation stage. Two stimulus kinds; orthogonal to triage state.
pub async fn handle_escalation(ctx: &StageContext, stimulus: EscalationStimulus) -> Result<Option<ApiResponse>> {
    match stimulus {
        EscalationStimulus::Queue(breach) => {
            auto_escalate(ctx, breach).await?;
            Ok(None)
        }
        EscalationStimulus::Request(request) => Ok(Some(manual_escalate(ctx, request).await?)),
    }
}

/// Loads the ticket and applies the escalation fields. Returns the pre-update
/// snapshot, or `None` when the ticket does not exist.
async fn apply_escalation(
    ctx: &StageContext,
    ticket_id: &TicketId,
    reason: String,
    method: EscalationMethod,
) -> Result<Option<Ticket>> {
    let Some(existing) = ctx.store.get(TICKETS_NAMESPACE, ticket_id).await? else {
        return Ok(None);
    };
    write_patched(ctx, ticket_id, &existing, |ticket| {
        ticket.escalated_to = Some(ESCALATION_TARGET.to_string());
        ticket.escalated_at_nanos = Some(now_nanos());
        ticket.escalation_reason = Some(reason);
        ticket.escalation_method = Some(method);
    })
    .await?;
    Ok(Some(existing))
}

async fn auto_escalate(ctx: &StageContext, breach: SlaBreached) -> Result<()> {
    warn!(
        "auto-escalation from sla breach ticket_id={} age_minutes={} priority={}",
        breach.ticket_id, breach.age_minutes, breach.priority
    );
    let existing =
        apply_escalation(ctx, &breach.ticket_id, sla_breach_reason(breach.age_minutes), EscalationMethod::Auto).await?;
    if existing.is_none() {
        // Breach events for tickets that no longer exist are not actionable.
        debug!("skipping escalation for unknown ticket ticket_id={}", breach.ticket_id);
    }
    Ok(())
}

async fn manual_escalate(ctx: &StageContext, request: ManualEscalate) -> Result<ApiResponse> {
    let existing =
        apply_escalation(ctx, &request.ticket_id, request.reason.clone(), EscalationMethod::Manual).await?;
    if existing.is_none() {
        return Ok(ApiResponse::not_found(format!("Ticket {} not found", request.ticket_id)));
    }
    info!("manual escalation via api ticket_id={} reason={}", request.ticket_id, request.reason);
    Ok(ApiResponse::ok(serde_json::json!({
        "ticketId": request.ticket_id,
        "escalatedTo": ESCALATION_TARGET,
        "message": "Ticket escalated successfully",
    })))
}
