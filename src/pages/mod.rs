//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Auth screens validate input locally, then hand off to `session::flow`.
//! Protected pages assume the router already wrapped them in a guard.

pub mod admin;
pub mod admin_login;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;
