//! One invocation of the bridge: read the server key, interpret the trigger
//! payload, map it to a notification and hand it to the push channel once.
//! Every outcome, including a panic in the pipeline, ends up as a
//! [`RelayResponse`].

use crate::error::{RelayError, RelayResponse};
use crate::state::AppState;
use chrono::Utc;
use futures_util::FutureExt;
use pushbridge_core::{DeepLinkData, build_notification, interpret};
use pushbridge_sdk::PushMessage;
use serde_json::{Map, Value, json};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info};

const UNKNOWN_DOCUMENT: &str = "unknown";

pub(crate) async fn invoke(state: &AppState, raw: &[u8]) -> RelayResponse {
    info!(bytes = raw.len(), "trigger received");

    let Some(server_key) = state.server_key() else {
        error!(var = %state.server_key_var, "push server key not set");
        return RelayError::Configuration {
            var: state.server_key_var.clone(),
        }
        .into();
    };

    match AssertUnwindSafe(relay(state, &server_key, raw))
        .catch_unwind()
        .await
    {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => err.into(),
        Err(panic) => RelayError::Unexpected(panic_message(&*panic)).into(),
    }
}

async fn relay(state: &AppState, server_key: &str, raw: &[u8]) -> Result<RelayResponse, RelayError> {
    let payload = decode_body(raw);
    let event = interpret(&payload, state.precedence)
        .map_err(|err| RelayError::malformed(err, payload.clone()))?;

    info!(
        collection = %event.collection,
        kind = %event.kind,
        descriptor = %event.descriptor,
        "event interpreted"
    );

    if !event.kind.is_supported() {
        info!(descriptor = %event.descriptor, "skipping non create/update event");
        return Ok(RelayResponse::skipped(&event.descriptor));
    }

    let notification = build_notification(Some(&event.collection), event.kind, &event.document);
    let data = DeepLinkData::build(&event, Utc::now());
    debug!(title = %notification.title, body = %notification.body, "notification built");

    let message = PushMessage::to_admins(notification, data);
    let fcm_response = state.channel.send(server_key, &message).await?;
    info!(collection = %event.collection, kind = %event.kind, "notification sent");

    let document_id = if message.data.document_id.is_empty() {
        UNKNOWN_DOCUMENT
    } else {
        message.data.document_id.as_str()
    };

    Ok(RelayResponse::ok(json!({
        "success": true,
        "notification": message.notification,
        "fcmResponse": fcm_response,
        "collection": event.collection,
        "eventType": event.kind,
        "documentId": document_id,
    })))
}

/// An empty body is `{}`. Hosts that double-encode send the payload as a JSON
/// string, which is unwrapped once. Undecodable bytes are kept as text so the
/// 400 response can echo them back.
fn decode_body(raw: &[u8]) -> Value {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::String(inner)) => {
            serde_json::from_str::<Value>(&inner).unwrap_or(Value::String(inner))
        }
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(raw).into_owned()),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during relay".to_string()
    }
}
