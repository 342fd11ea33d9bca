//! Input normalization shared by the auth screens.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trim and lowercase an email; `None` unless it looks like `local@domain`.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}
