// Topic-based publish/subscribe with asynchronous dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tracing::trace;

use crate::domain::errors::BusError;
use crate::domain::events::{GameEvent, Topic};

pub type Handler = Arc<dyn Fn(GameEvent) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Every handler invocation runs as its own task on the bus runtime, so
/// publishers never wait for handlers and handlers may publish in turn.
pub struct EventBus {
    runtime: Handle,
    next_id: AtomicU64,
    topics: RwLock<HashMap<Topic, Vec<(SubscriptionId, Handler)>>>,
}

impl EventBus {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            topics: RwLock::new(HashMap::new()),
        }
    }

    pub fn subscribe<F, Fut>(&self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: Fn(GameEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let handler: Handler = Arc::new(move |event| handler(event).boxed());
        self.topics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(topic)
            .or_default()
            .push((id, handler));
        trace!(%topic, subscription = id.0, "subscribed");
        id
    }

    /// Removes a handler. An invocation already dispatched may still run once.
    pub fn unsubscribe(&self, topic: Topic, id: SubscriptionId) -> Result<(), BusError> {
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        let handlers = topics.entry(topic).or_default();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        if handlers.len() == before {
            return Err(BusError::NotSubscribed { topic, id: id.0 });
        }
        trace!(%topic, subscription = id.0, "unsubscribed");
        Ok(())
    }

    /// Dispatches `event` to every handler of its topic and returns how many were started.
    pub fn publish(&self, event: GameEvent) -> usize {
        let topic = event.topic();
        let handlers: Vec<Handler> = self
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&topic)
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();

        for handler in &handlers {
            self.runtime.spawn(handler(event));
        }
        trace!(%topic, ?event, handlers = handlers.len(), "published");
        handlers.len()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RockSize;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn bus() -> Arc<EventBus> {
        Arc::new(EventBus::new(Handle::current()))
    }

    #[tokio::test]
    async fn when_nobody_subscribed_then_publish_is_a_no_op() {
        let bus = bus();
        assert_eq!(bus.publish(GameEvent::RockDestroyed(RockSize::Tiny)), 0);
    }

    #[tokio::test]
    async fn when_subscribed_then_handler_receives_the_payload() {
        let bus = bus();
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe(Topic::RockDestroyed, move |event| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(event);
            }
        });

        assert_eq!(bus.publish(GameEvent::RockDestroyed(RockSize::Medium)), 1);
        assert_eq!(bus.publish(GameEvent::SpaceshipFire), 0);

        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("handler should run");
        assert_eq!(received, Some(GameEvent::RockDestroyed(RockSize::Medium)));
    }

    #[tokio::test]
    async fn when_handler_publishes_then_dispatch_does_not_deadlock() {
        let bus = bus();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inner = bus.clone();
        bus.subscribe(Topic::RockDestroyed, move |_| {
            let bus = inner.clone();
            async move {
                bus.publish(GameEvent::SpaceshipExtraLife);
            }
        });
        bus.subscribe(Topic::SpaceshipExtraLife, move |event| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(event);
            }
        });

        bus.publish(GameEvent::RockDestroyed(RockSize::Big));

        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("nested publish should be delivered");
        assert_eq!(received, Some(GameEvent::SpaceshipExtraLife));
    }

    #[tokio::test]
    async fn when_unsubscribed_then_handler_is_gone_and_repeat_fails() {
        let bus = bus();
        let id = bus.subscribe(Topic::AlienFire, |_| async {});
        assert_eq!(bus.subscriber_count(Topic::AlienFire), 1);

        bus.unsubscribe(Topic::AlienFire, id).expect("first unsubscribe");

        assert_eq!(bus.publish(GameEvent::AlienFire), 0);
        assert!(matches!(
            bus.unsubscribe(Topic::AlienFire, id),
            Err(BusError::NotSubscribed { topic: Topic::AlienFire, .. })
        ));
    }
}
