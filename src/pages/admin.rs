//! Admin dashboard. Mounted behind `RequireAdmin`.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let email = move || auth.get().user.map(|u| u.email).unwrap_or_default();

    view! {
        <section class="admin">
            <h1>"Admin"</h1>
            <p>"Signed in as " {email}</p>
        </section>
    }
}
