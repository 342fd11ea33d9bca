//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the one `SessionManager` for the page, mirrors its phase into an
//! `RwSignal<AuthState>`, and hydrates it after mount. Server rendering never
//! reads storage, so SSR output always shows guarded routes as loading.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::{RequireAdmin, RequireUser};
use crate::components::toolbar::Toolbar;
use crate::config::ClientConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{
    admin::AdminPage, admin_login::AdminLoginPage, dashboard::DashboardPage, home::HomePage, login::LoginPage,
    register::RegisterPage,
};
use crate::session::{BrowserStore, SessionManager, SessionStore};
use crate::state::auth::AuthState;
use crate::util::storage_sync::install_storage_sync;

/// Session manager type provided through context.
pub type AppSession = SessionManager<BrowserStore, HttpAuthApi>;

/// Resolve build-time config, falling back to defaults on invalid values.
pub fn load_config() -> ClientConfig {
    ClientConfig::from_build_env().unwrap_or_else(|e| {
        leptos::logging::warn!("invalid build configuration, using defaults: {e}");
        ClientConfig::default()
    })
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session manager and auth state, then sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = load_config();
    let session: AppSession =
        SessionManager::new(SessionStore::new(BrowserStore, &config), HttpAuthApi::new(&config));
    let auth = RwSignal::new(AuthState::hydrating());

    let subscription = session.subscribe(move |phase| auth.set(AuthState::from(phase)));
    let unsubscribe_session = session.clone();
    on_cleanup(move || {
        unsubscribe_session.unsubscribe(subscription);
    });

    provide_context(session.clone());
    provide_context(auth);

    // Effects only run in the browser, after hydration.
    let init_session = session.clone();
    Effect::new(move || {
        init_session.initialize();
    });
    install_storage_sync(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Storefront"/>

        <Router>
            <Toolbar/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("login")) view=AdminLoginPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RequireUser><DashboardPage/></RequireUser> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <RequireAdmin><AdminPage/></RequireAdmin> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
