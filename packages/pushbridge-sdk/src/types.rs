use pushbridge_core::{ADMIN_TOPIC, DeepLinkData, NotificationRecord};
use serde::{Deserialize, Serialize};

/// FCM legacy HTTP 接口的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: String,
    pub notification: NotificationRecord,
    pub data: DeepLinkData,
}

impl PushMessage {
    /// 发往管理员主题的广播消息
    pub fn to_admins(notification: NotificationRecord, data: DeepLinkData) -> Self {
        Self {
            to: ADMIN_TOPIC.to_string(),
            notification,
            data,
        }
    }
}
