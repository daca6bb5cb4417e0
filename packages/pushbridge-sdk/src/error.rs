use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("FCM request failed with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SdkError {
    /// 推送服务返回的 HTTP 状态码（若有）
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Rejected { status, .. } => Some(*status),
            SdkError::HttpError(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// 推送服务返回的原始响应体（若有）
    pub fn response_body(&self) -> Option<&str> {
        match self {
            SdkError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
