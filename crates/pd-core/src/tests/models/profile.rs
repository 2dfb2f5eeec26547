use crate::{Identity, NewProfile, Profile};

use chrono::Utc;
use uuid::Uuid;

fn sample_profile(api_key: Option<&str>) -> Profile {
    Profile {
        user_id: Uuid::new_v4(),
        email: "a@b.com".into(),
        full_name: Some("Ada".into()),
        grok_api_key: api_key.map(String::from),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn given_profile_with_api_key_when_debug_formatted_then_key_redacted() {
    let profile = sample_profile(Some("xai-super-secret-key"));

    let debug = format!("{profile:?}");

    assert!(!debug.contains("xai-super-secret-key"));
    assert!(debug.contains("<redacted>"));
    assert!(profile.has_api_key());
}

#[test]
fn given_blank_api_key_when_checked_then_has_no_key() {
    assert!(!sample_profile(Some("  ")).has_api_key());
    assert!(!sample_profile(None).has_api_key());
}

#[test]
fn given_row_without_optional_fields_when_deserialized_then_none() {
    let json = r#"{
        "user_id": "550e8400-e29b-41d4-a716-446655440000",
        "email": "a@b.com",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }"#;

    let profile: Profile = serde_json::from_str(json).unwrap();

    assert!(profile.full_name.is_none());
    assert!(profile.grok_api_key.is_none());
}

#[test]
fn given_identity_with_blank_name_when_new_profile_built_then_name_absent() {
    let identity = Identity::new(Uuid::new_v4(), "a@b.com").with_display_name("   ");

    let row = NewProfile::for_identity(&identity);

    assert_eq!(row.user_id, identity.id);
    assert!(row.full_name.is_none());
    assert_eq!(row.created_at, row.updated_at);
}
