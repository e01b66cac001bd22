use crate::application::patch::write_patched;
use crate::application::stimulus::{ApiResponse, ManualTriage, TriageStimulus};
use crate::application::StageContext;
use crate::domain::{
    assignee_for_priority, sweep_event_priority, sweep_event_title, Ticket, TicketCreated, TicketTriaged,
    TriageMethod, STATUS_OPEN, SUPPORT_POOL, TICKETS_NAMESPACE, TOPIC_TICKET_TRIAGED,
};
use crate::foundation::{now_nanos, Result, TicketId};
use log::{info, warn};

/// Triage stage. One handler for all three stimulus kinds; only the request
/// kind produces a response.
pub async fn handle_triage(ctx: &StageContext, stimulus: TriageStimulus) -> Result<Option<ApiResponse>> {
    match stimulus {
        TriageStimulus::Queue(created) => {
            auto_triage(ctx, created).await?;
            Ok(None)
        }
        TriageStimulus::Request(request) => Ok(Some(manual_triage(ctx, request).await?)),
        TriageStimulus::Timer => {
            sweep_untriaged(ctx).await?;
            Ok(None)
        }
    }
}

/// Fields a triage operation overwrites. Everything else on the ticket is
/// preserved by the merge-patch.
struct TriagePatch<'a> {
    assignee: &'a str,
    priority: Option<&'a str>,
    method: TriageMethod,
}

/// Patches the ticket (when it exists) and publishes `ticket::triaged`.
/// A missing ticket skips the store update but still publishes: downstream
/// consumers need the notification regardless of local state.
async fn apply_triage(
    ctx: &StageContext,
    ticket_id: &TicketId,
    existing: Option<&Ticket>,
    patch: TriagePatch<'_>,
    event: TicketTriaged,
) -> Result<()> {
    if let Some(existing) = existing {
        write_patched(ctx, ticket_id, existing, |ticket| {
            ticket.assignee = Some(patch.assignee.to_string());
            if let Some(priority) = patch.priority {
                ticket.priority = priority.to_string();
            }
            ticket.triage_method = Some(patch.method);
            ticket.triaged_at_nanos = Some(now_nanos());
        })
        .await?;
    }
    ctx.events.publish(TOPIC_TICKET_TRIAGED, serde_json::to_value(&event)?).await
}

async fn auto_triage(ctx: &StageContext, created: TicketCreated) -> Result<()> {
    info!("auto-triaging ticket from queue ticket_id={} priority={}", created.ticket_id, created.priority);
    let assignee = assignee_for_priority(&created.priority);
    let existing = ctx.store.get(TICKETS_NAMESPACE, &created.ticket_id).await?;
    apply_triage(
        ctx,
        &created.ticket_id,
        existing.as_ref(),
        TriagePatch { assignee, priority: None, method: TriageMethod::Auto },
        TicketTriaged {
            ticket_id: created.ticket_id.clone(),
            assignee: assignee.to_string(),
            priority: created.priority.clone(),
            title: created.title.clone(),
        },
    )
    .await?;
    info!("ticket auto-triaged ticket_id={} assignee={}", created.ticket_id, assignee);
    Ok(())
}

async fn manual_triage(ctx: &StageContext, request: ManualTriage) -> Result<ApiResponse> {
    let Some(existing) = ctx.store.get(TICKETS_NAMESPACE, &request.ticket_id).await? else {
        return Ok(ApiResponse::not_found(format!("Ticket {} not found", request.ticket_id)));
    };
    info!("manual triage via api ticket_id={} assignee={}", request.ticket_id, request.assignee);
    let priority = request.priority.as_str();
    apply_triage(
        ctx,
        &request.ticket_id,
        Some(&existing),
        TriagePatch { assignee: &request.assignee, priority: Some(priority), method: TriageMethod::Manual },
        TicketTriaged {
            ticket_id: request.ticket_id.clone(),
            assignee: request.assignee.clone(),
            priority: priority.to_string(),
            title: existing.title.clone(),
        },
    )
    .await?;
    Ok(ApiResponse::ok(serde_json::json!({
        "ticketId": request.ticket_id,
        "assignee": request.assignee,
        "status": "triaged",
    })))
}

/// Visits every open, unassigned ticket exactly once. A swept ticket gains an
/// assignee and therefore stops qualifying, so no cross-invocation
/// deduplication is needed.
async fn sweep_untriaged(ctx: &StageContext) -> Result<()> {
    info!("running untriaged ticket sweep");
    let tickets = ctx.store.list(TICKETS_NAMESPACE).await?;
    let mut swept = 0usize;

    for ticket in tickets {
        if ticket.has_assignee() || ticket.status != STATUS_OPEN {
            continue;
        }
        warn!("found untriaged ticket during sweep ticket_id={}", ticket.id);
        let event = TicketTriaged {
            ticket_id: ticket.id.clone(),
            assignee: SUPPORT_POOL.to_string(),
            priority: sweep_event_priority(&ticket.priority),
            title: sweep_event_title(&ticket.title),
        };
        apply_triage(
            ctx,
            &ticket.id,
            Some(&ticket),
            TriagePatch { assignee: SUPPORT_POOL, priority: None, method: TriageMethod::AutoSweep },
            event,
        )
        .await?;
        swept += 1;
    }

    info!("sweep complete swept_count={}", swept);
    Ok(())
}
