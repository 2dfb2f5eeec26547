use crate::remote::{SessionChange, SessionSubscription, SubscriptionHandle};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// In-process hub remote implementations publish session changes to.
#[derive(Clone)]
pub struct SessionBroadcaster {
    sender: broadcast::Sender<SessionChange>,
    subscriber_count: Arc<AtomicUsize>,
}

impl SessionBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> SessionSubscription {
        let receiver = self.sender.subscribe();
        let total = self.subscriber_count.fetch_add(1, Ordering::SeqCst) + 1;

        log::debug!("Session change subscriber added ({} total subscribers)", total);

        let subscriber_count = Arc::clone(&self.subscriber_count);
        let handle = SubscriptionHandle::new(move || {
            let previous = subscriber_count
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    Some(n.saturating_sub(1))
                })
                .unwrap_or(0);
            log::debug!(
                "Session change subscriber removed ({} remaining subscribers)",
                previous.saturating_sub(1)
            );
        });

        SessionSubscription::new(receiver, handle)
    }

    /// Publish a change to every live subscriber. Returns the receiver count.
    pub fn publish(&self, change: SessionChange) -> usize {
        let event = change.event;
        match self.sender.send(change) {
            Ok(receiver_count) => {
                log::debug!(
                    "Published {} to {} session subscribers",
                    event,
                    receiver_count
                );
                receiver_count
            }
            Err(_) => {
                // No receivers - nothing is listening yet
                log::debug!("Published {} with no active subscribers", event);
                0
            }
        }
    }

    /// Subscribers that have not unsubscribed yet
    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
