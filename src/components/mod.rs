//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context providers installed by
//! `App`.

pub mod route_guard;
pub mod toolbar;
