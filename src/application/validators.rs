use crate::entities::user_type::UserType;

/// Validates that the input looks like `local@domain.tld`.
///
/// Not `validator::ValidateEmail`, which accepts `user@localhost`.
///
/// Surrounding whitespace is ignored. The rest must be non-whitespace
/// characters with exactly one `@`, and the part after it must contain a `.`
/// with at least one character on either side. No DNS or mailbox checks.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Lowercase and trim an email for use as a lookup key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parse a user type and check it against the allowed set.
fn parse_user_type(raw: &str, allowed: &[UserType]) -> Option<UserType> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<UserType>()
        .ok()
        .filter(|user_type| allowed.contains(user_type))
}

/// Validates that the input names one of the allowed user types.
pub fn is_valid_user_type(raw: &str, allowed: &[UserType]) -> bool {
    parse_user_type(raw, allowed).is_some()
}
