use crate::domain::Ticket;
use crate::foundation::{Result, TicketError, TicketId};
use crate::infrastructure::storage::TicketStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

struct MemoryInner {
    tickets: HashMap<(String, String), Ticket>,
}

impl MemoryInner {
    fn new() -> Self {
        Self { tickets: HashMap::new() }
    }
}

/// In-process `TicketStore`. Stands in for the reliable keyed store the
/// deployment environment provides; also the test backend.
pub struct MemoryTicketStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::new())) }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>> {
        self.inner.lock().map_err(|_| TicketError::StorageError {
            operation: "memory store lock".to_string(),
            details: "poisoned".to_string(),
        })
    }

    fn key(namespace: &str, id: &TicketId) -> (String, String) {
        (namespace.to_string(), id.as_str().to_string())
    }
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn get(&self, namespace: &str, id: &TicketId) -> Result<Option<Ticket>> {
        Ok(self.lock_inner()?.tickets.get(&Self::key(namespace, id)).cloned())
    }

    async fn set(&self, namespace: &str, id: &TicketId, ticket: Ticket) -> Result<()> {
        self.lock_inner()?.tickets.insert(Self::key(namespace, id), ticket);
        Ok(())
    }

    async fn list(&self, namespace: &str) -> Result<Vec<Ticket>> {
        let inner = self.lock_inner()?;
        Ok(inner.tickets.iter().filter(|((ns, _), _)| ns == namespace).map(|(_, ticket)| ticket.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{STATUS_OPEN, TICKETS_NAMESPACE};

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: TicketId::from(id),
            title: format!("ticket {}", id),
            priority: "low".to_string(),
            status: STATUS_OPEN.to_string(),
            ..Ticket::default()
        }
    }

    #[tokio::test]
    async fn set_get_list_round_trip() {
        let store = MemoryTicketStore::new();
        let id = TicketId::from("T-1");
        assert!(store.get(TICKETS_NAMESPACE, &id).await.expect("get").is_none());

        store.set(TICKETS_NAMESPACE, &id, ticket("T-1")).await.expect("set");
        store.set(TICKETS_NAMESPACE, &TicketId::from("T-2"), ticket("T-2")).await.expect("set");

        let loaded = store.get(TICKETS_NAMESPACE, &id).await.expect("get").expect("present");
        assert_eq!(loaded.title, "ticket T-1");

        let listed = store.list(TICKETS_NAMESPACE).await.expect("list");
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = MemoryTicketStore::new();
        store.set("tickets", &TicketId::from("T-1"), ticket("T-1")).await.expect("set");
        assert!(store.list("archive").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn set_overwrites_the_whole_record() {
        let store = MemoryTicketStore::new();
        let id = TicketId::from("T-1");
        store.set(TICKETS_NAMESPACE, &id, ticket("T-1")).await.expect("set");

        let mut updated = ticket("T-1");
        updated.assignee = Some("support-pool".to_string());
        store.set(TICKETS_NAMESPACE, &id, updated).await.expect("set");

        let loaded = store.get(TICKETS_NAMESPACE, &id).await.expect("get").expect("present");
        assert_eq!(loaded.assignee.as_deref(), Some("support-pool"));
    }
}
