use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pushbridge_core::{EventKind, InterpretError};
use pushbridge_sdk::SdkError;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, warn};

const FAILURE_HINT: &str = "Function execution failed. Check logs for details.";
const EVENT_FORMAT_HINT: &str =
    "Event format should be: databases.{dbId}.collections.{collectionId}.documents.{docId}.create";

#[derive(Debug, Error)]
pub(crate) enum RelayError {
    #[error("{var} not configured")]
    Configuration { var: String },

    #[error("event string not found")]
    MissingEvent { received: Value },

    #[error("invalid event format: {descriptor}")]
    InvalidEvent { descriptor: String },

    #[error(transparent)]
    Delivery(#[from] SdkError),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl RelayError {
    pub(crate) fn malformed(err: InterpretError, received: Value) -> Self {
        match err {
            InterpretError::MissingEventDescriptor => RelayError::MissingEvent { received },
            InterpretError::InvalidEventFormat { descriptor } => {
                RelayError::InvalidEvent { descriptor }
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Configuration { .. }
            | RelayError::MissingEvent { .. }
            | RelayError::InvalidEvent { .. } => StatusCode::BAD_REQUEST,
            RelayError::Delivery(_) | RelayError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            RelayError::Configuration { var } => json!({
                "error": self.to_string(),
                "message": format!("Please set {var} in the function environment"),
            }),
            RelayError::MissingEvent { received } => json!({
                "error": "Event string not found",
                "receivedData": received,
                "message": "Please check the function trigger configuration",
            }),
            RelayError::InvalidEvent { descriptor } => json!({
                "error": "Invalid event format",
                "eventString": descriptor,
                "message": EVENT_FORMAT_HINT,
            }),
            RelayError::Delivery(err) => {
                let mut body = json!({
                    "error": err.to_string(),
                    "errorName": "DeliveryError",
                    "message": FAILURE_HINT,
                });
                if let Some(status) = err.status() {
                    body["status"] = json!(status);
                }
                if let Some(response) = err.response_body() {
                    body["response"] = json!(response);
                }
                body
            }
            RelayError::Unexpected(_) => json!({
                "error": self.to_string(),
                "errorName": "UnexpectedError",
                "message": FAILURE_HINT,
            }),
        }
    }
}

/// 一次调用的响应：状态码与 JSON 响应体
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RelayResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: Value,
}

impl RelayResponse {
    pub(crate) fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub(crate) fn skipped(descriptor: &str) -> Self {
        Self::ok(json!({
            "message": "Event type not supported",
            "eventString": descriptor,
            "supportedTypes": EventKind::supported(),
        }))
    }

    /// 单次运行模式下打印到标准输出的形式
    pub(crate) fn to_json(&self) -> Value {
        json!({
            "status": self.status.as_u16(),
            "body": self.body,
        })
    }
}

impl From<RelayError> for RelayResponse {
    fn from(err: RelayError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            error!(error = %err, "relay failed");
        } else {
            warn!(error = %err, "relay rejected");
        }
        Self {
            status,
            body: err.body(),
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushbridge_core::{DeepLinkData, NotificationRecord};
    use pushbridge_sdk::{FcmClient, PushChannel, PushMessage};
    use std::time::Duration;

    #[test]
    fn test_configuration_error_response() {
        let response = RelayResponse::from(RelayError::Configuration {
            var: "FCM_SERVER_KEY".to_string(),
        });
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], json!("FCM_SERVER_KEY not configured"));
    }

    #[test]
    fn test_malformed_maps_interpret_errors() {
        let err = RelayError::malformed(InterpretError::MissingEventDescriptor, json!({ "a": 1 }));
        let response = RelayResponse::from(err);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], json!("Event string not found"));
        assert_eq!(response.body["receivedData"], json!({ "a": 1 }));

        let err = RelayError::malformed(
            InterpretError::InvalidEventFormat {
                descriptor: "databases.db1.documents.d.create".to_string(),
            },
            Value::Null,
        );
        let response = RelayResponse::from(err);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["eventString"], json!("databases.db1.documents.d.create"));
    }

    #[test]
    fn test_delivery_error_carries_upstream_status() {
        let err = RelayError::from(SdkError::Rejected {
            status: 503,
            body: "Unavailable".to_string(),
        });
        let response = RelayResponse::from(err);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["status"], json!(503));
        assert_eq!(response.body["response"], json!("Unavailable"));
        assert_eq!(response.body["errorName"], json!("DeliveryError"));
    }

    #[tokio::test]
    async fn test_delivery_error_without_upstream_response() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FcmClient::new(&format!("http://{addr}/fcm/send"))
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let message = PushMessage::to_admins(
            NotificationRecord::new("💳 New Payment", "Payment of ₹500 received"),
            DeepLinkData {
                collection: "payments".to_string(),
                document_id: "p1".to_string(),
                event: "create".to_string(),
                timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            },
        );
        let err = client.send("k", &message).await.unwrap_err();
        assert!(matches!(err, SdkError::HttpError(_)));

        let response = RelayResponse::from(RelayError::from(err));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body.get("status").is_none());
        assert!(response.body.get("response").is_none());
    }

    #[test]
    fn test_skipped_response() {
        let response = RelayResponse::skipped("databases.x.collections.bookings.documents.b1.delete");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], json!("Event type not supported"));
        assert_eq!(response.body["supportedTypes"], json!(["create", "update"]));
    }

    #[test]
    fn test_to_json_shape() {
        let response = RelayResponse::ok(json!({ "success": true }));
        assert_eq!(
            response.to_json(),
            json!({ "status": 200, "body": { "success": true } })
        );
    }
}
