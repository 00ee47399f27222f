use crate::{
    adapters::{
        http::app_state::AppState, mirror::google_script::GoogleScriptMirror,
        persistence::unconfigured::UnconfiguredWaitlistRepo,
    },
    application::use_cases::waitlist::{WaitlistMirror, WaitlistRepo, WaitlistUseCases},
    infra::{config::AppConfig, error::InfraError, http_client::build_client, postgres_persistence},
};
use std::fs::File;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let repo: Arc<dyn WaitlistRepo> = match &config.database_url {
        Some(database_url) => Arc::new(
            postgres_persistence(
                database_url,
                config.db_max_connections,
                config.run_migrations,
            )
            .await?,
        ) as Arc<dyn WaitlistRepo>,
        None => {
            warn!("DATABASE_URL is not set; waitlist signups will not be persisted");
            Arc::new(UnconfiguredWaitlistRepo)
        }
    };

    let mirror: Option<Arc<dyn WaitlistMirror>> = match &config.google_script_url {
        Some(url) => {
            info!(host = ?url.host_str(), "Mirroring new signups to Google Sheets");
            let client = build_client().map_err(InfraError::HttpClient)?;
            Some(Arc::new(GoogleScriptMirror::new(client, url.clone())) as Arc<dyn WaitlistMirror>)
        }
        None => None,
    };

    let waitlist_use_cases = WaitlistUseCases::new(repo, mirror, config.signup_policy());

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

pub fn init_tracing(log_file: &str) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let file = File::create(log_file).map_err(|source| InfraError::LogFile {
        path: log_file.to_string(),
        source,
    })?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
