//! Login page for email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::AppSession;
use crate::net::types::Credentials;
use crate::routes;
use crate::session::flow::{self, SignInError};
use crate::util::form::normalize_email;

pub(crate) const MISSING_CREDENTIALS: &str = "Enter your email and password.";
pub(crate) const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Trim/normalize the form fields into login credentials.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    let email = normalize_email(email).ok_or(INVALID_EMAIL)?;
    Ok(Credentials { email, password: password.to_owned() })
}

pub(crate) fn sign_in_failed_message(err: &SignInError) -> String {
    format!("Sign-in failed: {err}")
}

/// Login page. A successful sign-in lands on the user dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let just_registered = move || query.read().get("registered").is_some();

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
            match flow::sign_in(&session, &credentials).await {
                Ok(_) => {
                    password.set(String::new());
                    info.set(String::new());
                    navigate(routes::DASHBOARD, NavigateOptions::default());
                }
                Err(e) => info.set(sign_in_failed_message(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <Show when=just_registered>
                    <p class="login-message login-message--ok">"Account created. Sign in to continue."</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
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
                <p class="login-card__footer">
                    "New here? " <a href=routes::REGISTER>"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
