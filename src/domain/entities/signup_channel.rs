use serde::{Deserialize, Serialize};

/// Entry point a signup arrived through. Each channel stamps its own source
/// label on the stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupChannel {
    /// The landing page form.
    Website,
    /// Direct calls to the waitlist API, including the admin "add entry" tool.
    Api,
}

impl SignupChannel {
    pub fn source_label(&self) -> &'static str {
        match self {
            SignupChannel::Website => "Website Waitlist",
            SignupChannel::Api => "API Route",
        }
    }

    /// Whether a configured user type requirement applies to this channel.
    pub fn collects_user_type(&self) -> bool {
        matches!(self, SignupChannel::Website)
    }
}

impl std::fmt::Display for SignupChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_label())
    }
}
