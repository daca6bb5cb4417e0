use crate::bootstrap::config::RelaySettings;
use crate::state::AppState;
use anyhow::{Context, Result};
use pushbridge_sdk::FcmClient;
use std::sync::Arc;

pub(crate) fn app_state(settings: &RelaySettings) -> Result<AppState> {
    let client = FcmClient::new(&settings.fcm_endpoint)
        .with_context(|| format!("invalid PUSHBRIDGE_FCM_ENDPOINT: {}", settings.fcm_endpoint))?
        .with_timeout(settings.timeout);

    Ok(AppState {
        channel: Arc::new(client),
        precedence: settings.precedence,
        server_key_var: settings.server_key_var.clone(),
    })
}
