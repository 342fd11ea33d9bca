//! Public landing page.

use leptos::prelude::*;

use crate::routes;
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let greeting = move || {
        auth.get()
            .user
            .map(|user| format!("Welcome back, {}.", user.display_name()))
            .unwrap_or_else(|| "Build and sell your own courses.".to_owned())
    };

    view! {
        <section class="home">
            <h1>"Storefront"</h1>
            <p class="home__greeting">{greeting}</p>
            <a href=routes::DASHBOARD class="btn home__cta">
                "Go to my courses"
            </a>
        </section>
    }
}
