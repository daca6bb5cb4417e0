pub mod client;
pub mod types;
pub mod error;

pub use client::{DEFAULT_FCM_ENDPOINT, DEFAULT_TIMEOUT, FcmClient, PushChannel};
pub use types::*;
pub use error::{SdkError, SdkResult};
