use std::net::{Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use crate::{
    application::use_cases::waitlist::SignupPolicy, entities::user_type::UserType,
    infra::error::InfraError,
};

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Postgres connection string. When absent every store operation fails
    /// with `BackendUnavailable` instead of the process refusing to start.
    pub database_url: Option<SecretString>,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    /// Google Apps Script endpoint new signups are mirrored to. Absent disables mirroring.
    pub google_script_url: Option<Url>,
    /// Whether website signups must say whether they are a patient, practitioner or gym.
    pub require_user_type: bool,
    pub allowed_user_types: Vec<UserType>,
    /// Bearer token for the operator routes. Absent leaves them open.
    pub admin_token: Option<SecretString>,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from((Ipv4Addr::LOCALHOST, 3001)),
        );
        let cors_origin = parse_cors_origin(&get_env_default(
            "CORS_ORIGIN",
            String::from("http://localhost:3000"),
        ))?;
        let database_url = optional_env("DATABASE_URL").map(|url| SecretString::new(url.into()));
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let run_migrations: bool = get_env_default("RUN_MIGRATIONS", true);
        let google_script_url = optional_env("GOOGLE_SCRIPT_URL")
            .map(|raw| parse_script_url(&raw))
            .transpose()?;
        let require_user_type: bool = get_env_default("REQUIRE_USER_TYPE", false);
        let allowed_user_types = parse_user_types(&get_env_default(
            "WAITLIST_USER_TYPES",
            String::from("patient,practitioner,gym"),
        ))?;
        let admin_token = optional_env("ADMIN_TOKEN").map(|token| SecretString::new(token.into()));
        let log_file: String = get_env_default("LOG_FILE", String::from("app.log"));

        Ok(Self {
            bind_addr,
            cors_origin,
            database_url,
            db_max_connections,
            run_migrations,
            google_script_url,
            require_user_type,
            allowed_user_types,
            admin_token,
            log_file,
        })
    }

    pub fn signup_policy(&self) -> SignupPolicy {
        SignupPolicy {
            require_user_type: self.require_user_type,
            allowed_user_types: self.allowed_user_types.clone(),
        }
    }
}

/// Read a variable, treating unset and blank the same.
fn optional_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_cors_origin(raw: &str) -> Result<HeaderValue, InfraError> {
    raw.parse().map_err(|_| InfraError::InvalidConfig {
        var: "CORS_ORIGIN",
        reason: "must be a valid header value".into(),
    })
}

fn parse_script_url(raw: &str) -> Result<Url, InfraError> {
    let url = Url::parse(raw).map_err(|e| InfraError::InvalidConfig {
        var: "GOOGLE_SCRIPT_URL",
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(InfraError::InvalidConfig {
            var: "GOOGLE_SCRIPT_URL",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_user_types(raw: &str) -> Result<Vec<UserType>, InfraError> {
    let types = UserType::parse_list(raw).map_err(|reason| InfraError::InvalidConfig {
        var: "WAITLIST_USER_TYPES",
        reason,
    })?;
    if types.is_empty() {
        return Err(InfraError::InvalidConfig {
            var: "WAITLIST_USER_TYPES",
            reason: "at least one user type is required".into(),
        });
    }
    Ok(types)
}
