//! Email address validation

/// Longest local part accepted before the `@`.
const MAX_LOCAL_LEN: usize = 64;
/// Longest domain accepted after the `@`.
const MAX_DOMAIN_LEN: usize = 255;

/// Validates an email address of the form `local@domain.tld`.
///
/// Checks for:
/// - exactly one `@` with content on both sides
/// - at least one `.` in the domain, not leading, trailing or doubled
/// - a top-level label of two or more characters
/// - no whitespace anywhere
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN || !domain.contains('.') {
        return false;
    }

    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains("..") {
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_alphanumeric() || "._%+-'".contains(c));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-');

    if !local_ok || !domain_ok {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.chars().count() >= 2,
        None => false,
    }
}
