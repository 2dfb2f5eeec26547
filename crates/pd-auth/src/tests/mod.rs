mod controller;
mod properties;
mod session_store;
mod subscription;

use crate::tests::fake_remote::{FakeRemote, session_for};
use crate::{AuthController, SessionChange};

use std::sync::Arc;
use std::time::Duration;

use pd_core::{ControllerState, Identity};
use tokio::time::timeout;
use uuid::Uuid;

pub(crate) const EMAIL: &str = "a@b.com";
pub(crate) const PASSWORD: &str = "secret1";
pub(crate) const WAIT: Duration = Duration::from_secs(2);

pub(crate) fn start(fake: &Arc<FakeRemote>) -> AuthController {
    AuthController::start(fake.clone(), fake.clone())
}

/// Controller whose bootstrap resolved an existing session for `EMAIL`.
pub(crate) async fn signed_in(fake: &Arc<FakeRemote>) -> (AuthController, Identity) {
    let identity = fake.seed_account(EMAIL, PASSWORD, Some("Ada"));
    fake.seed_profile(&identity);
    fake.seed_session(&identity);

    let controller = start(fake);
    let state = settle(&controller).await;
    assert!(state.is_authenticated());
    (controller, identity)
}

pub(crate) async fn settle(controller: &AuthController) -> ControllerState {
    timeout(WAIT, controller.settled())
        .await
        .expect("controller should settle")
}

/// Wait for the first snapshot matching `predicate`.
pub(crate) async fn wait_until(
    controller: &AuthController,
    predicate: impl FnMut(&ControllerState) -> bool,
) -> ControllerState {
    let mut rx = controller.subscribe();
    timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("state should be reached")
        .expect("store should stay open")
        .clone()
}

/// Wait until the session-change listener has applied every change published
/// so far. The listener stays parked afterwards, so call this last.
pub(crate) async fn changes_applied(fake: &FakeRemote) {
    let marker = Identity::new(Uuid::new_v4(), "marker@b.com");
    let gate = fake.gate_profile_for(marker.id);
    fake.push(SessionChange::signed_in(session_for(&marker)));
    timeout(WAIT, gate.entered.notified())
        .await
        .expect("listener should reach the marker change");
}
