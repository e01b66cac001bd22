use crate::application::StageContext;
use crate::domain::{Ticket, TICKETS_NAMESPACE};
use crate::foundation::{Result, TicketId};

/// Merge-patches an existing ticket snapshot and writes it back. Every field
/// the mutator does not touch keeps its value from the snapshot.
///
/// The caller has already read `existing`; the window between that read and
/// this write is the documented non-atomic race of the read-then-patch
/// sequence (see `TicketStore`).
pub(crate) async fn write_patched(
    ctx: &StageContext,
    ticket_id: &TicketId,
    existing: &Ticket,
    mutate: impl FnOnce(&mut Ticket),
) -> Result<()> {
    let mut updated = existing.clone();
    mutate(&mut updated);
    ctx.store.set(TICKETS_NAMESPACE, ticket_id, updated).await
}
