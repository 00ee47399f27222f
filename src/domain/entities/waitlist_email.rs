use crate::validators::{is_valid_email, normalize_email};

pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";

/// An email address that passed validation and has been normalized
/// (trimmed, lowercased). This is the unique key of a waitlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    pub fn parse(raw: &str) -> Result<Self, String> {
        if !is_valid_email(raw) {
            return Err(INVALID_EMAIL_MESSAGE.to_string());
        }
        Ok(Self(normalize_email(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
