use crate::tests::fake_remote::FakeRemote;
use crate::tests::{EMAIL, PASSWORD, start};

use std::sync::{Arc, Mutex};

use pd_core::ProfilePatch;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    SignIn { correct: bool },
    SignOut,
    UpdateProfile(String),
    ClearError,
    FailSignOut(bool),
    FailProfileGet(bool),
    Announce(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3).prop_map(Op::Register),
        any::<bool>().prop_map(|correct| Op::SignIn { correct }),
        Just(Op::SignOut),
        "[A-Za-z ]{0,12}".prop_map(Op::UpdateProfile),
        Just(Op::ClearError),
        any::<bool>().prop_map(Op::FailSignOut),
        any::<bool>().prop_map(Op::FailProfileGet),
        any::<bool>().prop_map(Op::Announce),
    ]
}

struct Observed {
    /// (loading, identity/profile paired) after each operation settled
    settled: Vec<(bool, bool)>,
    /// identity/profile paired for every snapshot a subscriber saw
    streamed: Vec<bool>,
}

/// Run `ops` against a fresh controller. Every remote call yields, so the
/// subscriber also samples snapshots from inside each operation.
fn run(ops: Vec<Op>) -> Observed {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async move {
        let fake = FakeRemote::new();
        fake.seed_account(EMAIL, PASSWORD, Some("Ada"));
        fake.state().yield_on_calls = true;
        let controller = start(&fake);

        let streamed = Arc::new(Mutex::new(Vec::new()));
        let mut rx = controller.subscribe();
        let watcher = {
            let streamed = streamed.clone();
            tokio::spawn(async move {
                loop {
                    let consistent = rx.borrow_and_update().is_consistent();
                    streamed.lock().unwrap().push(consistent);
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            })
        };

        let mut observed = Vec::new();
        let state = controller.settled().await;
        observed.push((state.loading, state.is_consistent()));

        for op in ops {
            match op {
                Op::Register(n) => {
                    let email = format!("user{}@b.com", n);
                    controller.register(&email, PASSWORD, None).await;
                }
                Op::SignIn { correct } => {
                    let password = if correct { PASSWORD } else { "wrong" };
                    controller.sign_in(EMAIL, password).await;
                }
                Op::SignOut => controller.sign_out().await,
                Op::UpdateProfile(name) => {
                    controller
                        .update_profile(&ProfilePatch::default().full_name(name))
                        .await;
                }
                Op::ClearError => controller.clear_error(),
                Op::FailSignOut(fail) => {
                    fake.state().sign_out_error = fail.then(|| "Sign out rejected".to_string());
                    continue;
                }
                Op::FailProfileGet(fail) => {
                    fake.state().profile_get_error = fail.then(|| "Network error".to_string());
                    continue;
                }
                Op::Announce(on) => {
                    fake.state().publish_own_changes = on;
                    continue;
                }
            }

            let state = controller.snapshot();
            observed.push((state.loading, state.is_consistent()));
        }

        controller.shutdown().await;
        tokio::task::yield_now().await;
        watcher.abort();

        let streamed = streamed.lock().unwrap().clone();
        Observed {
            settled: observed,
            streamed,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn given_any_operation_sequence_when_each_settles_then_not_loading(
        ops in prop::collection::vec(op(), 1..12)
    ) {
        for (loading, _) in run(ops).settled {
            prop_assert!(!loading);
        }
    }

    #[test]
    fn given_any_operation_sequence_when_observed_then_identity_and_profile_paired(
        ops in prop::collection::vec(op(), 1..12)
    ) {
        let observed = run(ops);
        for (_, consistent) in observed.settled {
            prop_assert!(consistent);
        }
        prop_assert!(!observed.streamed.is_empty());
        for consistent in observed.streamed {
            prop_assert!(consistent);
        }
    }
}
