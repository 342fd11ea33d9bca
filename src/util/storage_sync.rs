//! Cross-tab session sync via the browser `storage` event.
//!
//! TRADE-OFFS
//! ==========
//! The event only fires in tabs other than the writer, so this tab re-reads
//! storage instead of trusting the event payload. Off-browser this is a no-op.

use crate::net::api::AuthApi;
use crate::session::{KeyValueStore, SessionManager};

/// Re-read the stored session whenever another tab changes one of its keys.
pub fn install_storage_sync<K, A>(session: SessionManager<K, A>)
where
    K: KeyValueStore + 'static,
    A: AuthApi + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast as _;
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
            if session.watches_key(ev.key().as_deref()) && session.resync() {
                leptos::logging::log!("session changed in another tab");
            }
        });
        if window
            .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
            .is_err()
        {
            leptos::logging::warn!("could not subscribe to storage events");
        }
        // Lives as long as the page.
        on_storage.forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}
