//! Gate components wrapping protected route views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router mounts `<RequireUser>` / `<RequireAdmin>` around a page. The
//! gate shows a placeholder while the session hydrates, nothing while a
//! redirect is under way, and the page once access is granted.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::session::guard::{Access, GuardOutcome, evaluate};
use crate::state::auth::AuthState;
use crate::util::auth::install_guard_redirect;

/// Render `children` only for signed-in users.
#[component]
pub fn RequireUser(children: ChildrenFn) -> impl IntoView {
    guarded(Access::User, children)
}

/// Render `children` only for signed-in admins.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(Access::Admin, children)
}

fn guarded(access: Access, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_guard_redirect(auth, access, use_navigate());

    move || match evaluate(access, &auth.get()) {
        GuardOutcome::Placeholder => view! {
            <div class="route-guard route-guard--loading" aria-busy="true">
                "Loading..."
            </div>
        }
        .into_any(),
        GuardOutcome::Redirect(_) => ().into_any(),
        GuardOutcome::Render => children().into_any(),
    }
}
