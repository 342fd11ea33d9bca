//! Top bar with navigation, the signed-in identity, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Visible on every route. Logout goes through `session::flow::sign_out`, so
//! the local session is always cleared; a failed server-side logout shows a
//! dismissible notice instead of blocking.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::routes;
use crate::session::flow;
use crate::state::auth::AuthState;

/// Top navigation bar.
#[component]
pub fn Toolbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    let notice = RwSignal::new(None::<String>);
    let signing_out = RwSignal::new(false);

    let signed_in = move || auth.get().user.is_some();
    let is_admin = move || auth.get().user.as_ref().is_some_and(|u| u.is_admin());
    let identity = move || {
        auth.get()
            .user
            .map(|user| user.display_name().to_owned())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let message = flow::sign_out(&session, |path| navigate(path, NavigateOptions::default())).await;
            notice.set(message);
            signing_out.set(false);
        });
    };

    view! {
        <nav class="toolbar">
            <a href=routes::HOME class="toolbar__brand">
                "Storefront"
            </a>
            <a href=routes::DASHBOARD class="toolbar__link" class:hidden=move || !signed_in()>
                "My courses"
            </a>
            <a href=routes::ADMIN class="toolbar__link" class:hidden=move || !is_admin()>
                "Admin"
            </a>
            <span class="toolbar__spacer"></span>
            <span class="toolbar__self">{identity}</span>
            <a href=routes::LOGIN class="btn" class:hidden=signed_in>
                "Sign in"
            </a>
            <a href=routes::REGISTER class="btn" class:hidden=signed_in>
                "Register"
            </a>
            <button
                class="btn toolbar__logout"
                class:hidden=move || !signed_in()
                disabled=move || signing_out.get()
                on:click=on_logout
                title="Logout"
            >
                "Logout"
            </button>
        </nav>
        <Show when=move || notice.get().is_some()>
            <div class="toolbar__notice" role="status">
                <span>{move || notice.get().unwrap_or_default()}</span>
                <button class="btn" on:click=move |_| notice.set(None)>
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
