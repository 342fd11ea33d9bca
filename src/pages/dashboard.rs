//! Signed-in user dashboard. Mounted behind `RequireUser`.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::auth::AuthState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let user = move || auth.get().user;

    view! {
        <section class="dashboard">
            <h1>"My courses"</h1>
            <dl class="dashboard__profile">
                <dt>"Name"</dt>
                <dd>{move || user().map(|u| u.display_name().to_owned()).unwrap_or_default()}</dd>
                <dt>"Email"</dt>
                <dd>{move || user().map(|u| u.email).unwrap_or_default()}</dd>
                <dt>"Role"</dt>
                <dd>
                    {move || match user().map(|u| u.role) {
                        Some(Role::Admin) => "admin",
                        _ => "user",
                    }}
                </dd>
            </dl>
        </section>
    }
}
