use crate::remote::SessionChange;

use tokio::sync::broadcast::{self, error::RecvError};

/// A cancellable registration for session-change notifications.
///
/// Split with [`SessionSubscription::into_parts`] when the receiving side
/// runs in a different task from the owner of the cancellation.
pub struct SessionSubscription {
    changes: SessionChanges,
    handle: SubscriptionHandle,
}

impl SessionSubscription {
    pub fn new(receiver: broadcast::Receiver<SessionChange>, handle: SubscriptionHandle) -> Self {
        Self {
            changes: SessionChanges { receiver },
            handle,
        }
    }

    pub async fn next(&mut self) -> Option<SessionChange> {
        self.changes.next().await
    }

    pub fn into_parts(self) -> (SessionChanges, SubscriptionHandle) {
        (self.changes, self.handle)
    }

    pub fn unsubscribe(self) {
        self.handle.unsubscribe();
    }
}

/// Receiving side of a subscription.
pub struct SessionChanges {
    receiver: broadcast::Receiver<SessionChange>,
}

impl SessionChanges {
    /// Next change, or None once the publisher is gone.
    /// A lagging receiver skips ahead; only the newest session matters.
    pub async fn next(&mut self) -> Option<SessionChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Session subscriber lagged, skipped {} changes", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Cancellation side of a subscription. The unsubscribe hook runs exactly
/// once: on [`SubscriptionHandle::unsubscribe`] or on drop, whichever is first.
pub struct SubscriptionHandle {
    on_unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    pub fn new(on_unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_unsubscribe: Some(Box::new(on_unsubscribe)),
        }
    }

    /// Handle with nothing to release.
    pub fn noop() -> Self {
        Self {
            on_unsubscribe: None,
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(on_unsubscribe) = self.on_unsubscribe.take() {
            on_unsubscribe();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}
