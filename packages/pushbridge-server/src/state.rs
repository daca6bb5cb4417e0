use pushbridge_core::CollectionPrecedence;
use pushbridge_sdk::PushChannel;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) channel: Arc<dyn PushChannel>,
    pub(crate) precedence: CollectionPrecedence,
    pub(crate) server_key_var: String,
}

impl AppState {
    /// 每次调用时重新读取推送服务密钥
    pub(crate) fn server_key(&self) -> Option<String> {
        std::env::var(&self.server_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
