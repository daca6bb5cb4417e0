use crate::error::*;
use crate::types::PushMessage;
use crate::SdkResult;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 推送投递通道
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Sends one message, authorised with the server key. Returns the
    /// channel's response body.
    async fn send(&self, server_key: &str, message: &PushMessage) -> SdkResult<Value>;
}

#[derive(Clone)]
pub struct FcmClient {
    client: Client,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl FcmClient {
    pub fn new(endpoint: &str) -> SdkResult<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: Url::parse(endpoint)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PushChannel for FcmClient {
    async fn send(&self, server_key: &str, message: &PushMessage) -> SdkResult<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .header(AUTHORIZATION, format!("key={}", server_key))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // FCM 只有 200 才表示已受理
        if status != StatusCode::OK {
            return Err(SdkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
