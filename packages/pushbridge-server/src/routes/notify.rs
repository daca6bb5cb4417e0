use crate::error::RelayResponse;
use crate::relay;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use std::sync::Arc;

/// 宿主平台触发一次函数调用，请求体即触发事件
pub(crate) async fn receive_trigger_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> RelayResponse {
    relay::invoke(&state, &body).await
}
