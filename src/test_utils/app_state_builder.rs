//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by in-memory doubles.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{
        SignupPolicy, WaitlistMirror, WaitlistRepo, WaitlistUseCases,
    },
    infra::config::AppConfig,
    test_utils::InMemoryWaitlistRepo,
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let repo = Arc::new(InMemoryWaitlistRepo::new());
/// let app_state = TestAppStateBuilder::new()
///     .with_repo(repo.clone())
///     .with_admin_token("letmein")
///     .build();
/// ```
pub struct TestAppStateBuilder {
    repo: Arc<dyn WaitlistRepo>,
    mirror: Option<Arc<dyn WaitlistMirror>>,
    policy: SignupPolicy,
    admin_token: Option<String>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryWaitlistRepo::new()),
            mirror: None,
            policy: SignupPolicy::default(),
            admin_token: None,
        }
    }

    /// Use a specific store (keep a clone of the `Arc` for assertions).
    pub fn with_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_mirror(mut self, mirror: Arc<dyn WaitlistMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn with_policy(mut self, policy: SignupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Require `Authorization: Bearer <token>` on the operator routes.
    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(token.to_string());
        self
    }

    pub fn build(self) -> AppState {
        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            database_url: None,
            db_max_connections: 1,
            run_migrations: false,
            google_script_url: None,
            require_user_type: self.policy.require_user_type,
            allowed_user_types: self.policy.allowed_user_types.clone(),
            admin_token: self.admin_token.map(|t| SecretString::new(t.into())),
            log_file: String::new(),
        });

        let waitlist_use_cases = Arc::new(WaitlistUseCases::new(
            self.repo,
            self.mirror,
            self.policy,
        ));

        AppState {
            config,
            waitlist_use_cases,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
