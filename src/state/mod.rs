//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Components depend on small reactive models provided through context
//! rather than on the session manager directly.

pub mod auth;
