// Hierarchical cancellation for background behaviours.

use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation handle.
///
/// A child token is cancelled whenever any ancestor is, so cancelling a level
/// scope reaches every alien runner started under it.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

struct Inner {
    tx: watch::Sender<bool>,
    parent: Option<CancelToken>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<CancelToken>) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner { tx, parent }),
        }
    }

    /// New token cancelled together with this one.
    pub fn child(&self) -> CancelToken {
        Self::with_parent(Some(self.clone()))
    }

    pub fn cancel(&self) {
        self.inner.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.tx.borrow()
            || self
                .inner
                .parent
                .as_ref()
                .is_some_and(CancelToken::is_cancelled)
    }

    /// Resolves once this token or any ancestor is cancelled.
    pub fn cancelled(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let mut rx = self.inner.tx.subscribe();
            match &self.inner.parent {
                Some(parent) => {
                    tokio::select! {
                        _ = wait_for_cancel(&mut rx) => {}
                        _ = parent.cancelled() => {}
                    }
                }
                None => wait_for_cancel(&mut rx).await,
            }
        })
    }
}

async fn wait_for_cancel(rx: &mut watch::Receiver<bool>) {
    loop {
        let cancelled = *rx.borrow_and_update();
        // The sender outlives every receiver, so a closed channel means teardown.
        if cancelled || rx.changed().await.is_err() {
            return;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
