// Observers react to bus events on behalf of the game.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::domain::events::{GameEvent, Topic};
use crate::use_cases::event_bus::SubscriptionId;
use crate::use_cases::game::Game;

/// A collaborator that subscribes to bus topics for the lifetime of a session.
pub trait EventObserver: Send + Sync {
    fn name(&self) -> &'static str;
    fn register(&self, game: &Arc<Game>);
    fn deregister(&self, game: &Game);
}

/// Subscriptions held by one observer.
///
/// Handlers only keep a weak reference to the game, so a dropped session
/// turns any late dispatch into a no-op.
#[derive(Debug, Default)]
pub struct Subscriptions {
    ids: Mutex<Vec<(Topic, SubscriptionId)>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F, Fut>(&self, game: &Arc<Game>, topic: Topic, handler: F)
    where
        F: Fn(Arc<Game>, GameEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let weak = Arc::downgrade(game);
        let id = game.bus().subscribe(topic, move |event| {
            let run = weak.upgrade().map(|game| handler(game, event));
            async move {
                if let Some(run) = run {
                    run.await;
                }
            }
        });
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((topic, id));
    }

    pub fn release(&self, game: &Game, observer: &'static str) {
        let ids = std::mem::take(&mut *self.ids.lock().unwrap_or_else(PoisonError::into_inner));
        for (topic, id) in ids {
            if let Err(e) = game.bus().unsubscribe(topic, id) {
                warn!(observer, error = %e, "unsubscribe failed");
            }
        }
    }
}
