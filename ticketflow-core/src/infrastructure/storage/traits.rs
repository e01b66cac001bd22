use crate::domain::Ticket;
use crate::foundation::{Result, TicketId};
use async_trait::async_trait;

/// The keyed persistence boundary. Durability lives behind this trait; the
/// core only relies on get/set/list over a namespace.
///
/// `get` followed by `set` is not atomic. Two concurrent operations against
/// the same ticket may lose one side's patch; serializing per-ticket writes
/// (or a compare-and-swap `set`) is the backend's concern, not the core's.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn get(&self, namespace: &str, id: &TicketId) -> Result<Option<Ticket>>;

    async fn set(&self, namespace: &str, id: &TicketId, ticket: Ticket) -> Result<()>;

    /// Unordered snapshot of every record in the namespace at call time.
    async fn list(&self, namespace: &str) -> Result<Vec<Ticket>>;

    fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
