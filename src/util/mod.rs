//! Browser-facing helpers for the session layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` turns guard decisions into router navigations, `form` normalizes
//! what the auth screens submit, and `storage_sync` feeds other tabs' storage
//! writes back into the session manager.

pub mod auth;
pub mod form;
pub mod storage_sync;
