use super::*;
use crate::net::api::ApiError;

#[test]
fn validate_login_input_normalizes_email() {
    assert_eq!(
        validate_login_input("  Ada@Example.com ", "hunter22"),
        Ok(Credentials { email: "ada@example.com".to_owned(), password: "hunter22".to_owned() })
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    let creds = validate_login_input("a@b.com", "  spaced  ").unwrap();
    assert_eq!(creds.password, "  spaced  ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("", "pw"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_login_input("a@b.com", ""), Err(MISSING_CREDENTIALS));
}

#[test]
fn validate_login_input_rejects_bad_email() {
    assert_eq!(validate_login_input("not-an-email", "pw"), Err(INVALID_EMAIL));
}

#[test]
fn sign_in_failed_message_includes_reason() {
    let err = SignInError::Api(ApiError::Rejected { status: 401, message: "invalid email or password".to_owned() });
    assert_eq!(sign_in_failed_message(&err), "Sign-in failed: invalid email or password (401)");
}
