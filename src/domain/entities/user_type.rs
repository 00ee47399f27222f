use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Self-declared role of a person joining the waitlist.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, AsRefStr, Display,
    EnumString,
)]
#[sqlx(type_name = "waitlist_user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserType {
    Patient,
    Practitioner,
    Gym,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Patient, UserType::Practitioner, UserType::Gym];

    /// Parse a comma-separated list such as `patient,gym`.
    /// Blank items are skipped; unknown names are rejected.
    pub fn parse_list(raw: &str) -> Result<Vec<UserType>, String> {
        let mut types = Vec::new();
        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let parsed: UserType = item
                .parse()
                .map_err(|_| format!("Unknown user type: {item}"))?;
            if !types.contains(&parsed) {
                types.push(parsed);
            }
        }
        Ok(types)
    }
}
