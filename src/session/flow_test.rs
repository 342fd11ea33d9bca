use std::cell::RefCell;
use std::sync::atomic::Ordering;

use futures::executor::block_on;

use super::*;
use crate::net::types::{LoginResponse, RegisterResponse, Role};
use crate::session::SessionPhase;
use crate::session::test_support::{FakeAuthApi, make_manager, make_user};

fn creds() -> Credentials {
    Credentials { email: "ada@example.com".to_owned(), password: "hunter22".to_owned() }
}

fn login_ok(role: Role) -> Result<LoginResponse, ApiError> {
    Ok(LoginResponse { access_token: "tok-1".to_owned(), user: make_user("ada@example.com", role) })
}

fn rejected() -> ApiError {
    ApiError::Rejected { status: 401, message: "invalid email or password".to_owned() }
}

// =============================================================
// sign_in
// =============================================================

#[test]
fn sign_in_starts_session() {
    let (backend, manager) = make_manager(FakeAuthApi::default().with_login(login_ok(Role::User)));
    manager.initialize();

    let user = block_on(sign_in(&manager, &creds())).unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(manager.token().as_deref(), Some("tok-1"));
    assert_eq!(backend.get("token").as_deref(), Some("tok-1"));
}

#[test]
fn sign_in_rejection_leaves_session_untouched() {
    let (backend, manager) = make_manager(FakeAuthApi::default().with_login(Err(rejected())));
    manager.initialize();

    let err = block_on(sign_in(&manager, &creds())).unwrap_err();

    assert_eq!(err, SignInError::Api(rejected()));
    assert_eq!(err.to_string(), "invalid email or password (401)");
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
    assert!(backend.is_empty());
}

// =============================================================
// admin_sign_in
// =============================================================

#[test]
fn admin_sign_in_accepts_admin() {
    let (_, manager) = make_manager(FakeAuthApi::default().with_login(login_ok(Role::Admin)));
    manager.initialize();

    let user = block_on(admin_sign_in(&manager, &creds())).unwrap();

    assert!(user.is_admin());
    assert!(manager.user().is_some_and(|u| u.is_admin()));
}

#[test]
fn admin_sign_in_refuses_plain_user_and_revokes_token() {
    let (backend, manager) = make_manager(FakeAuthApi::default().with_login(login_ok(Role::User)));
    manager.initialize();

    let err = block_on(admin_sign_in(&manager, &creds())).unwrap_err();

    assert_eq!(err, SignInError::NotAdmin);
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
    assert!(backend.is_empty());
    assert_eq!(*manager.api().logout_tokens.lock().unwrap(), vec!["tok-1".to_owned()]);
    assert_eq!(manager.api().login_calls.load(Ordering::SeqCst), 1);
}

// =============================================================
// sign_up
// =============================================================

#[test]
fn sign_up_reports_endpoint_result() {
    let profile = RegisterProfile {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "hunter22".to_owned(),
    };
    let ok = FakeAuthApi::default().with_register(Ok(RegisterResponse { token: "t".to_owned() }));
    assert_eq!(block_on(sign_up(&ok, &profile)), Ok(()));

    let conflict = ApiError::Rejected { status: 409, message: "account already exists".to_owned() };
    let taken = FakeAuthApi::default().with_register(Err(conflict.clone()));
    assert_eq!(block_on(sign_up(&taken, &profile)), Err(conflict));
}

// =============================================================
// sign_out
// =============================================================

#[test]
fn sign_out_navigates_home_without_notice() {
    let (_, manager) = make_manager(FakeAuthApi::default().with_login(login_ok(Role::User)));
    manager.initialize();
    block_on(sign_in(&manager, &creds())).unwrap();
    let visited = RefCell::new(Vec::new());

    let notice = block_on(sign_out(&manager, |path| visited.borrow_mut().push(path.to_owned())));

    assert_eq!(notice, None);
    assert_eq!(*visited.borrow(), vec![routes::HOME.to_owned()]);
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
}

#[test]
fn sign_out_navigates_before_guards_see_signed_out() {
    let (_, manager) = make_manager(FakeAuthApi::default().with_login(login_ok(Role::User)));
    manager.initialize();
    block_on(sign_in(&manager, &creds())).unwrap();
    let events: std::sync::Arc<std::sync::Mutex<Vec<String>>> = std::sync::Arc::default();
    let sink = std::sync::Arc::clone(&events);
    manager.subscribe(move |phase| {
        if *phase == SessionPhase::Unauthenticated {
            sink.lock().unwrap().push("signed out".to_owned());
        }
    });

    block_on(sign_out(&manager, |path| events.lock().unwrap().push(format!("navigate {path}"))));

    assert_eq!(*events.lock().unwrap(), vec![format!("navigate {}", routes::HOME), "signed out".to_owned()]);
}

#[test]
fn sign_out_remote_failure_still_navigates_and_returns_notice() {
    let api = FakeAuthApi::default()
        .with_login(login_ok(Role::User))
        .with_logout(Err(ApiError::Network("offline".to_owned())));
    let (backend, manager) = make_manager(api);
    manager.initialize();
    block_on(sign_in(&manager, &creds())).unwrap();
    let visited = RefCell::new(Vec::new());

    let notice = block_on(sign_out(&manager, |path| visited.borrow_mut().push(path.to_owned())));

    assert!(notice.unwrap().contains("network error: offline"));
    assert_eq!(*visited.borrow(), vec![routes::HOME.to_owned()]);
    assert!(backend.is_empty());
}

#[test]
fn sign_out_while_pending_does_not_navigate() {
    let api = FakeAuthApi::default().with_login(login_ok(Role::User));
    let release = api.gate_logout();
    let (_, manager) = make_manager(api);
    manager.initialize();
    block_on(sign_in(&manager, &creds())).unwrap();
    let visited = RefCell::new(Vec::new());

    block_on(async {
        let mut first = Box::pin(manager.logout());
        assert!(futures::poll!(first.as_mut()).is_pending());

        let notice = sign_out(&manager, |path| visited.borrow_mut().push(path.to_owned())).await;
        assert_eq!(notice, None);
        assert!(visited.borrow().is_empty());

        release.send(()).unwrap();
        first.await.unwrap();
    });
}
