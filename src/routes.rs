//! Route paths shared by the router, guards, and screens.

/// Public landing page; also where sign-out ends up.
pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ADMIN_LOGIN: &str = "/admin/login";
/// Signed-in user dashboard.
pub const DASHBOARD: &str = "/dashboard";
/// Admin dashboard.
pub const ADMIN: &str = "/admin";
