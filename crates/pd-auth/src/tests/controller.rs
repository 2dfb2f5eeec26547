use crate::tests::fake_remote::FakeRemote;
use crate::tests::{WAIT, settle, signed_in, start};

use pd_core::ControllerState;
use tokio::time::timeout;

#[tokio::test]
async fn given_started_controller_when_checked_then_subscribed_once() {
    let fake = FakeRemote::new();

    let controller = start(&fake);

    assert_eq!(fake.broadcaster().subscriber_count(), 1);
    assert!(!controller.is_torn_down());
}

#[tokio::test]
async fn given_controller_when_torn_down_twice_then_unsubscribed_exactly_once() {
    let fake = FakeRemote::new();
    let other = fake.broadcaster().subscribe();
    let controller = start(&fake);
    assert_eq!(fake.broadcaster().subscriber_count(), 2);

    controller.teardown();
    controller.teardown();

    assert!(controller.is_torn_down());
    assert_eq!(fake.broadcaster().subscriber_count(), 1);
    other.unsubscribe();
}

#[tokio::test]
async fn given_controller_when_dropped_then_unsubscribed() {
    let fake = FakeRemote::new();
    let controller = start(&fake);
    settle(&controller).await;

    drop(controller);

    assert_eq!(fake.broadcaster().subscriber_count(), 0);
}

#[tokio::test]
async fn given_shutdown_when_called_then_listener_task_joined() {
    let fake = FakeRemote::new();
    let (controller, _) = signed_in(&fake).await;

    let result = timeout(WAIT, controller.shutdown()).await;

    assert!(result.is_ok(), "Listener should stop after teardown");
    assert!(controller.snapshot().is_authenticated());
}

#[tokio::test]
async fn given_torn_down_controller_when_operation_runs_then_store_untouched() {
    let fake = FakeRemote::new();
    let (controller, _) = signed_in(&fake).await;
    let before = controller.snapshot();
    controller.teardown();

    controller.sign_out().await;
    controller.clear_error();

    assert_eq!(controller.snapshot(), before);
}

#[tokio::test]
async fn given_torn_down_controller_when_settled_awaited_then_returns_immediately() {
    let fake = FakeRemote::new();
    let gate = fake.gate_session();
    let controller = start(&fake);
    timeout(WAIT, gate.entered.notified()).await.unwrap();

    controller.teardown();
    let state = timeout(WAIT, controller.settled()).await.unwrap();

    assert_eq!(state, ControllerState::initial());
    gate.release.notify_one();
}

#[tokio::test]
async fn given_two_controllers_when_one_signs_out_then_other_unaffected() {
    let first_remote = FakeRemote::new();
    let second_remote = FakeRemote::new();
    let (first, _) = signed_in(&first_remote).await;
    let (second, _) = signed_in(&second_remote).await;

    first.sign_out().await;

    assert_eq!(first.snapshot(), ControllerState::unauthenticated());
    assert!(second.snapshot().is_authenticated());
}
