use super::*;

#[test]
fn validate_register_input_builds_profile() {
    assert_eq!(
        validate_register_input(" Ada Lovelace ", "ADA@example.com", "hunter222", "hunter222"),
        Ok(RegisterProfile {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "hunter222".to_owned(),
        })
    );
}

#[test]
fn validate_register_input_requires_fields() {
    assert_eq!(validate_register_input("  ", "a@b.com", "hunter222", "hunter222"), Err(MISSING_FIELDS));
    assert_eq!(validate_register_input("Ada", "", "hunter222", "hunter222"), Err(MISSING_FIELDS));
    assert_eq!(validate_register_input("Ada", "a@b.com", "", ""), Err(MISSING_FIELDS));
}

#[test]
fn validate_register_input_checks_email_before_password() {
    assert_eq!(validate_register_input("Ada", "nope", "short", "other"), Err(INVALID_EMAIL));
}

#[test]
fn validate_register_input_enforces_password_length() {
    assert_eq!(validate_register_input("Ada", "a@b.com", "1234567", "1234567"), Err(SHORT_PASSWORD));
    assert!(validate_register_input("Ada", "a@b.com", "12345678", "12345678").is_ok());
}

#[test]
fn validate_register_input_requires_matching_confirmation() {
    assert_eq!(validate_register_input("Ada", "a@b.com", "hunter222", "hunter223"), Err(PASSWORD_MISMATCH));
}

#[test]
fn registered_redirect_targets_login_with_flag() {
    assert_eq!(registered_redirect(), "/login?registered=1");
}
