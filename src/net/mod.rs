//! Networking modules for the storefront REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the auth calls and `types` defines the shared wire schema.

pub mod api;
pub mod types;
