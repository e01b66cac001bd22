use crate::foundation::{Result, TicketError};
use crate::infrastructure::events::EventSink;
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// One message on the queue transport.
#[derive(Clone, Debug)]
pub struct QueueEnvelope {
    pub topic: String,
    pub payload: serde_json::Value,
}

struct Subscriber {
    topics: Option<Vec<String>>,
    sender: mpsc::UnboundedSender<QueueEnvelope>,
}

impl Subscriber {
    fn wants(&self, topic: &str) -> bool {
        match &self.topics {
            Some(topics) => topics.iter().any(|t| t == topic),
            None => true,
        }
    }
}

/// In-process topic bus standing in for the queue transport. Publishes fan
/// out to every live subscriber whose topic filter matches; disconnected
/// subscribers are dropped on the next publish.
pub struct ChannelQueue {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChannelQueue {
    pub fn new() -> Self {
        Self { subscribers: Mutex::new(Vec::new()) }
    }

    /// Subscription limited to the given topics.
    pub fn subscribe_topics(&self, topics: &[&str]) -> mpsc::UnboundedReceiver<QueueEnvelope> {
        self.add_subscriber(Some(topics.iter().map(|t| t.to_string()).collect()))
    }

    /// Subscription that sees every topic. Used by observers and tests.
    pub fn subscribe_all(&self) -> mpsc::UnboundedReceiver<QueueEnvelope> {
        self.add_subscriber(None)
    }

    fn add_subscriber(&self, topics: Option<Vec<String>>) -> mpsc::UnboundedReceiver<QueueEnvelope> {
        let (sender, receiver) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber { topics, sender });
        }
        receiver
    }

    fn deliver(&self, envelope: QueueEnvelope) -> Result<()> {
        let mut subscribers = self.subscribers.lock().map_err(|_| TicketError::PublishError {
            topic: envelope.topic.clone(),
            details: "subscriber list lock poisoned".to_string(),
        })?;
        subscribers.retain(|subscriber| {
            if !subscriber.wants(&envelope.topic) {
                return !subscriber.sender.is_closed();
            }
            subscriber.sender.send(envelope.clone()).is_ok()
        });
        Ok(())
    }
}

impl Default for ChannelQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for ChannelQueue {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<()> {
        self.deliver(QueueEnvelope { topic: topic.to_string(), payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn topic_filter_limits_delivery() {
        let queue = ChannelQueue::new();
        let mut created_only = queue.subscribe_topics(&["ticket::created"]);
        let mut everything = queue.subscribe_all();

        queue.publish("ticket::created", json!({"ticketId": "T-1"})).await.expect("publish");
        queue.publish("ticket::triaged", json!({"ticketId": "T-1"})).await.expect("publish");

        let envelope = created_only.try_recv().expect("created envelope");
        assert_eq!(envelope.topic, "ticket::created");
        assert!(created_only.try_recv().is_err());

        assert_eq!(everything.try_recv().expect("first").topic, "ticket::created");
        assert_eq!(everything.try_recv().expect("second").topic, "ticket::triaged");
    }

    #[tokio::test]
    async fn dropped_subscribers_do_not_fail_publishes() {
        let queue = ChannelQueue::new();
        let receiver = queue.subscribe_all();
        drop(receiver);
        queue.publish("ticket::created", json!({})).await.expect("publish after drop");
    }
}
