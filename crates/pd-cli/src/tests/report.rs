use crate::Report;

use chrono::Utc;
use pd_core::{AuthOutcome, AuthStatus, ControllerState, Profile};
use serde_json::Value;
use uuid::Uuid;

fn profile_with_key() -> Profile {
    Profile {
        user_id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        full_name: Some("Ada".to_string()),
        grok_api_key: Some("xai-super-secret".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn given_failed_outcome_when_rendered_as_json_then_error_included() {
    let report = Report::outcome("login", AuthOutcome::failed("Invalid login credentials"));

    let json: Value = serde_json::from_str(&report.render(true).unwrap()).unwrap();

    assert_eq!(json["kind"], "outcome");
    assert_eq!(json["command"], "login");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid login credentials");
    assert!(!report.is_success());
}

#[test]
fn given_successful_outcome_when_rendered_as_text_then_ok_line() {
    let report = Report::outcome("logout", AuthOutcome::ok());

    assert_eq!(report.render(false).unwrap(), "logout: ok");
    assert!(report.is_success());
}

#[test]
fn given_profile_with_api_key_when_rendered_then_key_never_printed() {
    let report = Report::profile(&profile_with_key());

    let json = report.render(true).unwrap();
    let text = report.render(false).unwrap();

    assert!(!json.contains("xai-super-secret"));
    assert!(!text.contains("xai-super-secret"));
    assert!(json.contains("\"has_api_key\": true"));
    assert!(text.contains("api key: set"));
}

#[test]
fn given_errored_state_when_status_reported_then_status_and_error_shown() {
    let state = ControllerState::unauthenticated().with_error("Network request failed");

    let report = Report::status(&state);

    assert_eq!(
        report,
        Report::Status {
            status: AuthStatus::Unauthenticated,
            email: None,
            error: Some("Network request failed".to_string()),
        }
    );
    let text = report.render(false).unwrap();
    assert!(text.contains("status: unauthenticated"));
    assert!(text.contains("error: Network request failed"));
}
