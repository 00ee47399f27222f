use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{MirrorRecord, WaitlistMirror},
};

/// Forwards waitlist records to a Google Apps Script web app that appends
/// them to a sheet.
#[derive(Clone)]
pub struct GoogleScriptMirror {
    client: Client,
    script_url: Url,
}

impl GoogleScriptMirror {
    pub fn new(client: Client, script_url: Url) -> Self {
        Self { client, script_url }
    }
}

#[async_trait]
impl WaitlistMirror for GoogleScriptMirror {
    async fn forward(&self, record: &MirrorRecord) -> AppResult<()> {
        self.client
            .post(self.script_url.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::MirrorFailure(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::MirrorFailure(e.to_string()))?;
        Ok(())
    }
}
