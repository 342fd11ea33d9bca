//! Admin sign-in. Same form as the user login, but only admin accounts get a
//! session.

#[cfg(test)]
#[path = "admin_login_test.rs"]
mod admin_login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::pages::login::validate_login_input;
use crate::routes;
use crate::session::flow::{self, SignInError};

pub(crate) fn admin_sign_in_failed_message(err: &SignInError) -> String {
    match err {
        SignInError::NotAdmin => "This account is not an administrator.".to_owned(),
        other => format!("Admin sign-in failed: {other}"),
    }
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flow::admin_sign_in(&session, &credentials).await {
                Ok(_) => {
                    password.set(String::new());
                    info.set(String::new());
                    navigate(routes::ADMIN, NavigateOptions::default());
                }
                Err(e) => info.set(admin_sign_in_failed_message(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card login-card--admin">
                <h1>"Admin sign in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="admin@example.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
