use crate::ProfilePatch;

#[test]
fn given_blank_api_key_when_normalized_then_key_dropped() {
    let patch = ProfilePatch::default()
        .full_name("  New Name ")
        .grok_api_key("   ");

    let normalized = patch.normalized();

    assert_eq!(normalized.full_name.as_deref(), Some("New Name"));
    assert!(normalized.grok_api_key.is_none());
}

#[test]
fn given_patch_when_serialized_then_absent_fields_omitted() {
    let patch = ProfilePatch::default().full_name("New Name");

    let json = serde_json::to_value(&patch).unwrap();

    assert_eq!(json, serde_json::json!({ "full_name": "New Name" }));
}

#[test]
fn given_empty_patch_when_checked_then_is_empty() {
    assert!(ProfilePatch::default().is_empty());
    assert!(ProfilePatch::default().grok_api_key("").normalized().is_empty());
}

#[test]
fn given_patch_with_key_when_debug_formatted_then_key_redacted() {
    let patch = ProfilePatch::default().grok_api_key("xai-0123456789");

    assert!(!format!("{patch:?}").contains("xai-0123456789"));
}
