use crate::{SessionBroadcaster, SessionChange, SubscriptionHandle};
use crate::tests::fake_remote::session_for;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pd_core::Identity;
use tokio::time::{Duration, timeout};
use uuid::Uuid;

fn counting_handle() -> (SubscriptionHandle, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handle = SubscriptionHandle::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (handle, count)
}

#[test]
fn given_handle_when_unsubscribed_then_hook_runs_once() {
    let (handle, count) = counting_handle();

    handle.unsubscribe();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn given_handle_when_dropped_then_hook_runs_once() {
    let (handle, count) = counting_handle();

    drop(handle);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn given_broadcaster_when_subscribed_and_unsubscribed_then_count_tracks() {
    let broadcaster = SessionBroadcaster::default();

    let first = broadcaster.subscribe();
    let second = broadcaster.subscribe();
    assert_eq!(broadcaster.subscriber_count(), 2);

    first.unsubscribe();
    assert_eq!(broadcaster.subscriber_count(), 1);

    let (_changes, handle) = second.into_parts();
    drop(handle);
    assert_eq!(broadcaster.subscriber_count(), 0);
}

#[test]
fn given_no_subscribers_when_published_then_zero_receivers() {
    let broadcaster = SessionBroadcaster::default();

    assert_eq!(broadcaster.publish(SessionChange::signed_out()), 0);
}

#[tokio::test]
async fn given_subscriber_when_published_then_change_received() {
    let broadcaster = SessionBroadcaster::default();
    let mut subscription = broadcaster.subscribe();
    let session = session_for(&Identity::new(Uuid::new_v4(), "a@b.com"));

    broadcaster.publish(SessionChange::signed_in(session.clone()));

    let change = timeout(Duration::from_millis(100), subscription.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(change, SessionChange::signed_in(session));
}

#[tokio::test]
async fn given_lagging_subscriber_when_polled_then_skips_to_newest() {
    let broadcaster = SessionBroadcaster::new(1);
    let mut subscription = broadcaster.subscribe();
    let session = session_for(&Identity::new(Uuid::new_v4(), "a@b.com"));

    broadcaster.publish(SessionChange::signed_out());
    broadcaster.publish(SessionChange::signed_in(session.clone()));
    broadcaster.publish(SessionChange::token_refreshed(session.clone()));

    let change = timeout(Duration::from_millis(100), subscription.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(change, SessionChange::token_refreshed(session));
}

#[tokio::test]
async fn given_broadcaster_dropped_when_polled_then_stream_ends() {
    let broadcaster = SessionBroadcaster::default();
    let mut subscription = broadcaster.subscribe();

    drop(broadcaster);

    let change = timeout(Duration::from_millis(100), subscription.next())
        .await
        .unwrap();
    assert!(change.is_none());
}
