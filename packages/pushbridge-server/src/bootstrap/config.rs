use anyhow::{Context, Result, bail};
use pushbridge_core::CollectionPrecedence;
use pushbridge_sdk::{DEFAULT_FCM_ENDPOINT, DEFAULT_TIMEOUT};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub(crate) const SERVER_KEY_VAR: &str = "FCM_SERVER_KEY";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RelaySettings {
    pub(crate) addr: SocketAddr,
    pub(crate) fcm_endpoint: String,
    pub(crate) timeout: Duration,
    pub(crate) precedence: CollectionPrecedence,
    /// The key itself is read on every invocation, never cached here.
    pub(crate) server_key_var: String,
}

pub(crate) fn relay_settings_from_env() -> Result<RelaySettings> {
    relay_settings_from(|name| std::env::var(name).ok())
}

pub(crate) fn relay_settings_from(lookup: impl Fn(&str) -> Option<String>) -> Result<RelaySettings> {
    let addr_text = lookup("PUSHBRIDGE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_text
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid PUSHBRIDGE_ADDR: {addr_text}"))?;

    let fcm_endpoint =
        lookup("PUSHBRIDGE_FCM_ENDPOINT").unwrap_or_else(|| DEFAULT_FCM_ENDPOINT.to_string());

    let timeout = match lookup("PUSHBRIDGE_TIMEOUT_SECS") {
        Some(text) => {
            let secs = text
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid PUSHBRIDGE_TIMEOUT_SECS: {text}"))?;
            if secs == 0 {
                bail!("invalid PUSHBRIDGE_TIMEOUT_SECS: must be at least 1 second");
            }
            Duration::from_secs(secs)
        }
        None => DEFAULT_TIMEOUT,
    };

    let precedence = match lookup("PUSHBRIDGE_COLLECTION_PRECEDENCE") {
        Some(text) => text
            .parse::<CollectionPrecedence>()
            .context("invalid PUSHBRIDGE_COLLECTION_PRECEDENCE")?,
        None => CollectionPrecedence::default(),
    };

    Ok(RelaySettings {
        addr,
        fcm_endpoint,
        timeout,
        precedence,
        server_key_var: SERVER_KEY_VAR.to_string(),
    })
}
