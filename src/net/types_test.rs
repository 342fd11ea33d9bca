use super::*;

// =============================================================
// Role serde
// =============================================================

#[test]
fn role_serializes_to_lowercase() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
}

#[test]
fn role_rejects_unknown_value() {
    assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
}

// =============================================================
// User
// =============================================================

#[test]
fn user_missing_role_defaults_to_user() {
    let user: User = serde_json::from_value(serde_json::json!({ "email": "a@b.com" })).unwrap();
    assert_eq!(user.role, Role::User);
    assert!(!user.is_admin());
    assert!(user.extra.is_empty());
}

#[test]
fn user_keeps_provider_fields() {
    let raw = serde_json::json!({
        "_id": "66aa",
        "email": "admin@b.com",
        "name": "Ada",
        "role": "admin",
        "avatar": "https://cdn.example/ada.png"
    });
    let user: User = serde_json::from_value(raw.clone()).unwrap();
    assert!(user.is_admin());
    assert_eq!(user.extra.get("_id"), Some(&serde_json::json!("66aa")));
    assert_eq!(serde_json::to_value(&user).unwrap(), raw);
}

#[test]
fn user_without_email_is_rejected() {
    assert!(serde_json::from_value::<User>(serde_json::json!({ "role": "user" })).is_err());
}

#[test]
fn display_name_falls_back_to_email() {
    let mut user: User = serde_json::from_value(serde_json::json!({ "email": "a@b.com" })).unwrap();
    assert_eq!(user.display_name(), "a@b.com");
    user.name = Some("  ".to_owned());
    assert_eq!(user.display_name(), "a@b.com");
    user.name = Some("Ada".to_owned());
    assert_eq!(user.display_name(), "Ada");
}

// =============================================================
// Responses
// =============================================================

#[test]
fn login_response_parses_token_and_user() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({
        "access_token": "tok-1",
        "user": { "email": "a@b.com", "role": "user" }
    }))
    .unwrap();
    assert_eq!(resp.access_token, "tok-1");
    assert_eq!(resp.user.email, "a@b.com");
}

#[test]
fn error_body_prefers_message_then_error() {
    let body: ErrorBody =
        serde_json::from_value(serde_json::json!({ "message": "Invalid credentials", "error": "x" })).unwrap();
    assert_eq!(body.reason(), Some("Invalid credentials"));
    let body: ErrorBody = serde_json::from_value(serde_json::json!({ "error": "Email taken" })).unwrap();
    assert_eq!(body.reason(), Some("Email taken"));
    let body: ErrorBody = serde_json::from_value(serde_json::json!({ "message": " " })).unwrap();
    assert_eq!(body.reason(), None);
}
