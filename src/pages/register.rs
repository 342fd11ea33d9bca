//! Account registration page.
//!
//! Registration does not sign the user in; on success the page sends them to
//! the login view with a confirmation banner.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::net::types::RegisterProfile;
use crate::routes;
use crate::session::flow;
use crate::util::form::{MIN_PASSWORD_LEN, normalize_email};

pub(crate) const MISSING_FIELDS: &str = "Fill in every field.";
pub(crate) const INVALID_EMAIL: &str = "Enter a valid email address.";
pub(crate) const SHORT_PASSWORD: &str = "Password must be at least 8 characters.";
pub(crate) const PASSWORD_MISMATCH: &str = "Passwords do not match.";

pub(crate) fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterProfile, &'static str> {
    let name = name.trim();
    if name.is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    let email = normalize_email(email).ok_or(INVALID_EMAIL)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SHORT_PASSWORD);
    }
    if password != confirm {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(RegisterProfile { name: name.to_owned(), email, password: password.to_owned() })
}

pub(crate) fn registered_redirect() -> String {
    format!("{}?registered=1", routes::LOGIN)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let profile = match validate_register_input(&name.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(profile) => profile,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match flow::sign_up(session.api(), &profile).await {
                Ok(()) => navigate(&registered_redirect(), NavigateOptions::default()),
                Err(e) => info.set(format!("Registration failed: {e}")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        autocomplete="name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? " <a href=routes::LOGIN>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
